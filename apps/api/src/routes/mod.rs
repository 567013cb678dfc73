pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers as chat;
use crate::recommend::handlers as recommend;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog + recommendations
        .route("/api/v1/catalog/facets", get(recommend::handle_catalog_facets))
        .route("/api/v1/recommend", post(recommend::handle_recommend))
        .route(
            "/api/v1/resume/extract",
            post(recommend::handle_extract_resume),
        )
        // Sessions
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/bookmarks",
            get(session::handle_list_bookmarks).post(session::handle_add_bookmark),
        )
        // Chat assistant
        .route(
            "/api/v1/chat",
            get(chat::handle_chat_history).post(chat::handle_chat_message),
        )
        .with_state(state)
}
