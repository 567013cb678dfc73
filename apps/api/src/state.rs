use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::embed::Embedder;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only job catalog, shared across sessions without locking.
    pub catalog: Arc<Catalog>,
    /// Embedding model handle, constructed once at startup and reused for
    /// the process lifetime. Tests inject a fake implementation.
    pub embedder: Arc<dyn Embedder>,
    pub sessions: SessionStore,
    pub config: Config,
}
