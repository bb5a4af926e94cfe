use crate::config::ServerConfig;
use crate::error::ServerResult;
use std::sync::Arc;
use store::{BackendConfig, TemplateStore};

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Template store (shared across requests, injected once at startup)
    pub store: Arc<TemplateStore>,
}

impl ServerState {
    /// Create new server state
    ///
    /// Opens the embedded template database when `store_path` is
    /// configured, otherwise falls back to an in-memory store.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let backend_config = match &config.store_path {
            Some(path) => BackendConfig::redb(path.to_string_lossy()),
            None => BackendConfig::in_memory(),
        };
        let store = Arc::new(TemplateStore::new(&backend_config)?);

        Ok(Self {
            config: Arc::new(config),
            store,
        })
    }

    /// Build state around an existing store (e.g., in-memory for tests).
    pub fn with_store(config: ServerConfig, store: TemplateStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
        }
    }
}
