//! Music Catalog Server Library
//!
//! A data-access layer over a SQLite music catalog (albums, artists, songs
//! and their associations), plus the thin HTTP surface that serves it.

pub mod catalog_store;
pub mod config;
pub mod server;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use catalog_store::{CatalogError, CatalogStore, SqliteCatalogStore};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
