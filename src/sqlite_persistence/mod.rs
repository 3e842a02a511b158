mod versioned_schema;

pub use versioned_schema::{
    run_sql_script, Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema,
    BASE_DB_VERSION,
};
