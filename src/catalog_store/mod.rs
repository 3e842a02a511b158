mod error;
mod models;
mod schema;
mod store;
mod trait_def;
mod validation;

pub use error::{CatalogError, CatalogResult, ErrorPayload};
pub use models::*;
pub use schema::{latest_catalog_schema, CATALOG_VERSIONED_SCHEMAS};
pub use store::SqliteCatalogStore;
pub use trait_def::CatalogStore;
pub use validation::parse_new_album;
