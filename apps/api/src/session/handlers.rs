//! Axum route handlers for sessions and bookmarks.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::Bookmark;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SessionIdQuery {
    pub session_id: Uuid,
}

#[derive(Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct BookmarkRequest {
    pub session_id: Uuid,
    pub job_title: String,
    pub industry: String,
    pub location: String,
    pub rating: u8,
}

#[derive(Serialize)]
pub struct BookmarkListResponse {
    pub bookmarks: Vec<Bookmark>,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(State(state): State<AppState>) -> Json<CreateSessionResponse> {
    let session_id = state.sessions.create().await;
    Json(CreateSessionResponse { session_id })
}

/// POST /api/v1/bookmarks
///
/// Appends a bookmark to the session. Duplicates are allowed: bookmarking
/// the same job twice records two entries.
pub async fn handle_add_bookmark(
    State(state): State<AppState>,
    Json(request): Json<BookmarkRequest>,
) -> Result<StatusCode, AppError> {
    if !(1..=5).contains(&request.rating) {
        return Err(AppError::Validation(
            "rating must be between 1 and 5".to_string(),
        ));
    }

    state
        .sessions
        .append_bookmark(
            request.session_id,
            Bookmark {
                job_title: request.job_title,
                industry: request.industry,
                location: request.location,
                rating: request.rating,
                created_at: Utc::now(),
            },
        )
        .await?;

    Ok(StatusCode::CREATED)
}

/// GET /api/v1/bookmarks
pub async fn handle_list_bookmarks(
    State(state): State<AppState>,
    Query(params): Query<SessionIdQuery>,
) -> Result<Json<BookmarkListResponse>, AppError> {
    let bookmarks = state.sessions.bookmarks(params.session_id).await?;
    Ok(Json(BookmarkListResponse { bookmarks }))
}
