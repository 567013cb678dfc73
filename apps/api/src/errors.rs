use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant is recoverable at the request level: a failed query never
/// touches the catalog or another session's state.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No jobs match the selected filters")]
    NoMatch,

    #[error("Unreadable document: {0}")]
    UnreadableDocument(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::NoMatch => (
                StatusCode::NOT_FOUND,
                "NO_MATCH",
                "No jobs match the selected filters. Try adjusting filters.".to_string(),
            ),
            AppError::UnreadableDocument(msg) => {
                tracing::warn!("Unreadable document: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "UNREADABLE_DOCUMENT",
                    "The uploaded document could not be read. Please re-upload a valid PDF."
                        .to_string(),
                )
            }
            AppError::Encoding(msg) => {
                tracing::warn!("Encoding error: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "ENCODING_ERROR",
                    "The text could not be encoded for matching".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
