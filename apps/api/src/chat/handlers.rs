//! Axum route handlers for the chat assistant.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::JobRecord;
use crate::chat::compose_reply;
use crate::errors::AppError;
use crate::recommend::ranker::{rank, Recommendation};
use crate::session::handlers::SessionIdQuery;
use crate::session::{ChatTurn, Sender};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Serialize)]
pub struct ChatHistoryResponse {
    pub turns: Vec<ChatTurn>,
}

/// POST /api/v1/chat
///
/// One synchronous unit of work: append the user's turn, rank the full
/// catalog against the message, append the assistant's reply, return both
/// the reply text and the structured matches.
pub async fn handle_chat_message(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    state
        .sessions
        .append_chat_turn(
            request.session_id,
            ChatTurn {
                sender: Sender::User,
                message: request.message.clone(),
            },
        )
        .await?;

    let subset: Vec<&JobRecord> = state.catalog.jobs().iter().collect();
    let recommendations = rank(
        state.embedder.as_ref(),
        &request.message,
        &subset,
        state.config.top_k,
    )
    .await?;
    let reply = compose_reply(&recommendations);

    state
        .sessions
        .append_chat_turn(
            request.session_id,
            ChatTurn {
                sender: Sender::Assistant,
                message: reply.clone(),
            },
        )
        .await?;

    Ok(Json(ChatResponse {
        reply,
        recommendations,
    }))
}

/// GET /api/v1/chat
pub async fn handle_chat_history(
    State(state): State<AppState>,
    Query(params): Query<SessionIdQuery>,
) -> Result<Json<ChatHistoryResponse>, AppError> {
    let turns = state.sessions.chat_history(params.session_id).await?;
    Ok(Json(ChatHistoryResponse { turns }))
}
