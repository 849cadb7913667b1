//! Application state.

use std::sync::Arc;

use tokio::sync::watch;

use gcam_store::SharedStore;

use crate::config::ApiConfig;

/// Shared application state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: Arc<SharedStore>,
    /// Flips to true once when the process is shutting down; long-lived
    /// stream responses watch it so they end instead of pinning the server
    pub shutdown: watch::Receiver<bool>,
}

impl AppState {
    pub fn new(config: ApiConfig, store: Arc<SharedStore>, shutdown: watch::Receiver<bool>) -> Self {
        Self {
            config,
            store,
            shutdown,
        }
    }
}
