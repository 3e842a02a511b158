//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestServer, TestClient, ARTIST_1_ID};
//! use reqwest::StatusCode;
//!
//! #[tokio::test]
//! async fn test_get_artist() {
//!     let server = TestServer::spawn().await;
//!     let client = TestClient::new(server.base_url.clone());
//!
//!     let response = client.get_artist(ARTIST_1_ID).await;
//!     assert_eq!(response.status(), StatusCode::OK);
//! }
//! ```

#![allow(dead_code, unused_imports)]

mod client;
mod constants;
mod fixtures;
mod server;

pub use client::TestClient;
pub use constants::*;
pub use fixtures::{
    album_1, album_1_json, album_2, album_2_json, create_catalog_script_path,
    create_empty_catalog_db, create_test_catalog,
};
pub use server::TestServer;
