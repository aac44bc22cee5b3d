//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::db::DocumentStore;
use crate::error::AppError;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the document store, when one is configured.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    store: Option<Arc<dyn DocumentStore>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - API configuration
    /// * `store` - Document store, `None` when no database is configured
    #[must_use]
    pub fn new(config: ApiConfig, store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get the document store, if one is configured.
    #[must_use]
    pub fn store(&self) -> Option<&dyn DocumentStore> {
        self.inner.store.as_deref()
    }

    /// Get the document store or fail the request.
    ///
    /// # Errors
    ///
    /// Returns `AppError::StoreUnavailable` when no store is configured.
    pub fn require_store(&self) -> Result<&dyn DocumentStore, AppError> {
        self.store().ok_or(AppError::StoreUnavailable)
    }
}
