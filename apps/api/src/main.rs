mod catalog;
mod chat;
mod config;
mod embed;
mod errors;
mod extract;
mod recommend;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::embed::minilm::MiniLmEmbedder;
use crate::embed::Embedder;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Load the job catalog; it stays immutable for the process lifetime
    let catalog = Arc::new(Catalog::load(&config.catalog_path)?);
    info!(
        "Catalog loaded: {} jobs, {} industries, {} locations",
        catalog.len(),
        catalog.facets().industries.len(),
        catalog.facets().locations.len()
    );

    // Load the embedding model exactly once, before the server accepts
    // requests; every handler shares this handle
    let embedder: Arc<dyn Embedder> = Arc::new(MiniLmEmbedder::new()?);
    info!(
        "Embedding model loaded: {} ({} dims)",
        embedder.model_name(),
        embedder.dimension()
    );

    let sessions = SessionStore::new();

    // Build app state
    let state = AppState {
        catalog,
        embedder,
        sessions,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
