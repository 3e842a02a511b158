//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own catalog database.

use super::constants::*;
use super::fixtures::create_test_catalog;
use music_catalog_server::catalog_store::SqliteCatalogStore;
use music_catalog_server::server::state::GuardedCatalogStore;
use music_catalog_server::{make_app, RequestsLoggingLevel, ServerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance backed by a temporary catalog database
///
/// When dropped, the server shuts down and the database is removed.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    pub port: u16,

    /// Path of the catalog database, for reopening it directly in tests
    pub db_path: PathBuf,

    _temp_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port, serving the test catalog
    ///
    /// # Panics
    ///
    /// Panics if the catalog cannot be created, the port cannot be bound or
    /// the server does not become ready within the timeout.
    pub async fn spawn() -> Self {
        let (temp_dir, db_path) = create_test_catalog().expect("Failed to create test catalog");

        let catalog_store: GuardedCatalogStore =
            Arc::new(SqliteCatalogStore::open(&db_path).expect("Failed to open catalog store"));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            ..ServerConfig::default()
        };
        let app = make_app(config, catalog_store);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            db_path,
            _temp_dir: temp_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Polls the ranking endpoint, which answers on any valid catalog
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client
                .get(format!("{}/v1/stats/top-length?n=0", self.base_url))
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => return,
                _ => tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await,
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
