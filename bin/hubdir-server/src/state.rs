//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use hubdir_core::CatalogService;

use crate::config::Config;

/// State shared across all HTTP handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Catalog queries over the shared document store.
    pub catalog: CatalogService,
}
