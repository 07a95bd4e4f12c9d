use std::sync::Arc;

use kinfolk_store::Store;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// JSON document store rooted at `config.data_dir`.
    pub store: Arc<Store>,
    /// Server configuration (paths, limits, credentials).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            store: Arc::new(Store::open(&config.data_dir)),
            config: Arc::new(config),
        }
    }
}
