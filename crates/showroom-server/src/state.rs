use std::sync::Arc;

use showroom_store::{MemoryStore, StoreError};

use crate::config::ServerConfig;
use crate::error::{ApiError, ApiResult};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Product and promotion storage.
    pub store: Arc<MemoryStore>,
    /// Server configuration (scope, admin credentials, upload limits).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: MemoryStore, config: ServerConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }

    /// Run a store write on the blocking thread pool.
    ///
    /// Writes hold the store lock while the snapshot file is rewritten.
    pub async fn write_store<T, F>(&self, op: F) -> ApiResult<T>
    where
        F: FnOnce(&MemoryStore) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let result = tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|e| ApiError::Internal(format!("Store task failed: {e}")))?;
        Ok(result?)
    }
}
