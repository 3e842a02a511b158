use anyhow::{bail, Context, Result};
use rusqlite::{params, types::Type, Connection};
use std::path::Path;

#[macro_export]
macro_rules! sqlite_column {
    ($name:expr, $sql_type:expr $(, $field:ident = $value:expr)*) => {
        {
            // Allow unused_mut because the variable is only mutated when optional
            // field assignments are passed to the macro (e.g., `is_primary_key = true`)
            #[allow(unused_mut)]
            let mut column = Column {
                name: $name,
                sql_type: $sql_type,
                is_primary_key: false,
                non_null: false,
                foreign_key: None,
            };
            $(
                column.$field = $value;
            )*
            column
        }
    };
}

#[derive(Debug, PartialEq, Eq)]
pub enum SqlType {
    Text,
    Integer,
    Real,
}

impl SqlType {
    fn as_sql(&self) -> &'static str {
        match self {
            SqlType::Text => "TEXT",
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
        }
    }
}

#[allow(unused)]
pub enum ForeignKeyOnChange {
    NoAction,
    Restrict,
    Cascade,
}

impl ForeignKeyOnChange {
    fn as_sql(&self) -> &'static str {
        match self {
            ForeignKeyOnChange::NoAction => "NO ACTION",
            ForeignKeyOnChange::Restrict => "RESTRICT",
            ForeignKeyOnChange::Cascade => "CASCADE",
        }
    }
}

pub struct ForeignKey {
    pub foreign_table: &'static str,
    pub foreign_column: &'static str,
    pub on_delete: ForeignKeyOnChange,
}

pub struct Column<'a, S: AsRef<str>> {
    pub name: S,
    pub sql_type: &'a SqlType,
    pub is_primary_key: bool,
    pub non_null: bool,
    pub foreign_key: Option<&'a ForeignKey>,
}

/// A table definition. When more than one column is flagged as primary key
/// the key is emitted as a composite `PRIMARY KEY (...)` table constraint.
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column<'static, &'static str>],
    pub indices: &'static [(&'static str, &'static str)],
}

impl Table {
    fn primary_key_columns(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|c| c.is_primary_key)
            .map(|c| c.name)
            .collect()
    }

    pub fn create(&self, conn: &Connection) -> Result<()> {
        let primary_key = self.primary_key_columns();
        let inline_primary_key = primary_key.len() == 1;

        let mut create_sql = format!("CREATE TABLE {} (", self.name);
        for (column_index, column) in self.columns.iter().enumerate() {
            if column_index > 0 {
                create_sql.push_str(", ");
            }
            create_sql.push_str(&format!("{} {}", column.name, column.sql_type.as_sql()));
            if column.is_primary_key && inline_primary_key {
                create_sql.push_str(" PRIMARY KEY");
            }
            if column.non_null {
                create_sql.push_str(" NOT NULL");
            }
            if let Some(foreign_key) = column.foreign_key {
                create_sql.push_str(&format!(
                    " REFERENCES {}({}) ON DELETE {}",
                    foreign_key.foreign_table,
                    foreign_key.foreign_column,
                    foreign_key.on_delete.as_sql()
                ));
            }
        }

        if primary_key.len() > 1 {
            create_sql.push_str(&format!(", PRIMARY KEY ({})", primary_key.join(", ")));
        }
        create_sql.push_str(");");
        conn.execute(&create_sql, params![])?;

        for (index_name, column_name) in self.indices {
            conn.execute(
                &format!(
                    "CREATE INDEX {} ON {}({});",
                    index_name, self.name, column_name
                ),
                params![],
            )?;
        }
        Ok(())
    }
}

pub struct VersionedSchema {
    pub version: usize,
    pub tables: &'static [Table],
}

impl VersionedSchema {
    pub fn create(&self, conn: &Connection) -> Result<()> {
        conn.execute("PRAGMA foreign_keys = ON;", params![])?;
        for table in self.tables {
            table.create(conn)?;
        }
        conn.execute(
            &format!("PRAGMA user_version = {}", BASE_DB_VERSION + self.version),
            [],
        )?;
        Ok(())
    }

    /// Drops every table of this schema, children first.
    pub fn drop_all(&self, conn: &Connection) -> Result<()> {
        for table in self.tables.iter().rev() {
            conn.execute(&format!("DROP TABLE IF EXISTS {};", table.name), [])?;
        }
        Ok(())
    }

    pub fn validate(&self, conn: &Connection) -> Result<()> {
        for table in self.tables {
            let mut stmt = conn.prepare(&format!("PRAGMA table_info({});", table.name))?;
            let actual_columns: Vec<Result<Column<'_, String>, rusqlite::Error>> = stmt
                .query_map(params![], |row| {
                    let name = row.get::<usize, String>(1)?;
                    let sql_type = match row.get::<_, String>(2)?.to_uppercase().as_str() {
                        "TEXT" => &SqlType::Text,
                        "INTEGER" => &SqlType::Integer,
                        "REAL" => &SqlType::Real,
                        _ => {
                            return Err(rusqlite::Error::InvalidColumnType(
                                2,
                                "".to_string(),
                                Type::Text,
                            ))
                        }
                    };

                    Ok(Column {
                        name,
                        sql_type,
                        non_null: row.get::<_, i32>(3)? == 1,
                        // Composite keys report the column's position within the key
                        is_primary_key: row.get::<_, i32>(5)? > 0,
                        foreign_key: None,
                    })
                })?
                .collect();

            if actual_columns.is_empty() {
                bail!("Table {} does not exist", table.name);
            }

            if actual_columns.len() != table.columns.len() {
                bail!(
                    "Table {} has {} columns, expected {}. Found column names: {}, expected: {}",
                    table.name,
                    actual_columns.len(),
                    table.columns.len(),
                    actual_columns
                        .iter()
                        .filter_map(|c| c.as_ref().ok().map(|column| column.name.clone()))
                        .collect::<Vec<String>>()
                        .join(", "),
                    table
                        .columns
                        .iter()
                        .map(|c| c.name)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }

            for (actual_column_result, expected_column) in
                actual_columns.iter().zip(table.columns.iter())
            {
                let actual_column = match actual_column_result {
                    Ok(column) => column,
                    Err(e) => bail!("Error reading column: {:?}", e),
                };
                if actual_column.name != expected_column.name {
                    bail!(
                        "Table {} Column name mismatch: expected {}, got {}",
                        &table.name,
                        expected_column.name,
                        actual_column.name
                    );
                }
                if actual_column.sql_type != expected_column.sql_type {
                    bail!(
                        "Table {} Column {} type mismatch: expected {:?}, got {:?}",
                        &table.name,
                        expected_column.name,
                        expected_column.sql_type,
                        actual_column.sql_type
                    );
                }
                if actual_column.non_null != expected_column.non_null {
                    bail!(
                        "Table {} Column {} non-null mismatch: expected {}, got {}",
                        &table.name,
                        expected_column.name,
                        expected_column.non_null,
                        actual_column.non_null
                    );
                }
                if actual_column.is_primary_key != expected_column.is_primary_key {
                    bail!(
                        "Table {} Column {} primary key mismatch: expected {}, got {}",
                        &table.name,
                        expected_column.name,
                        expected_column.is_primary_key,
                        actual_column.is_primary_key
                    );
                }
            }

            // PRAGMA foreign_key_list returns: id, seq, table, from, to, on_update, on_delete, match
            let mut fk_stmt = conn.prepare(&format!("PRAGMA foreign_key_list({})", table.name))?;

            struct ActualFk {
                from_column: String,
                to_table: String,
                to_column: String,
            }

            let actual_fks: Vec<ActualFk> = fk_stmt
                .query_map([], |row| {
                    Ok(ActualFk {
                        from_column: row.get(3)?,
                        to_table: row.get(2)?,
                        to_column: row.get(4)?,
                    })
                })?
                .filter_map(|r| r.ok())
                .collect();

            for column in table.columns {
                if let Some(expected_fk) = column.foreign_key {
                    let found = actual_fks.iter().any(|actual| {
                        actual.from_column == column.name
                            && actual.to_table == expected_fk.foreign_table
                            && actual.to_column == expected_fk.foreign_column
                    });
                    if !found {
                        bail!(
                            "Table {} column {} is missing foreign key: expected REFERENCES {}({})",
                            table.name,
                            column.name,
                            expected_fk.foreign_table,
                            expected_fk.foreign_column,
                        );
                    }
                }
            }
        }
        Ok(())
    }
}

/// Runs every statement of an SQL script file against the connection.
pub fn run_sql_script<P: AsRef<Path>>(conn: &Connection, script_path: P) -> Result<()> {
    let script_path = script_path.as_ref();
    let script = std::fs::read_to_string(script_path)
        .with_context(|| format!("Failed to read SQL script: {:?}", script_path))?;
    conn.execute_batch(&script)
        .with_context(|| format!("Failed to execute SQL script: {:?}", script_path))?;
    Ok(())
}

pub const BASE_DB_VERSION: usize = 99999;
