use axum::extract::FromRef;

use crate::catalog_store::CatalogStore;
use std::sync::Arc;

use super::ServerConfig;

pub type GuardedCatalogStore = Arc<dyn CatalogStore>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub catalog_store: GuardedCatalogStore,
}

impl FromRef<ServerState> for GuardedCatalogStore {
    fn from_ref(input: &ServerState) -> Self {
        input.catalog_store.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
