//! Per-session state: chat transcript and bookmarked jobs.
//!
//! In-memory only — sessions are created empty, mutated by explicit user
//! actions, and discarded with the process. The store is passed explicitly
//! through `AppState` rather than living in ambient global state, and
//! entries are isolated by session id so concurrent sessions never share
//! mutable state.

pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

/// One chat message. Turns are appended in strict chronological order and
/// replayed read-only for display.
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub sender: Sender,
    pub message: String,
}

/// A bookmarked job with the user's 1-5 rating. Bookmarks are append-only:
/// the same job bookmarked twice produces two independent entries, and
/// nothing removes them within a session.
#[derive(Debug, Clone, Serialize)]
pub struct Bookmark {
    pub job_title: String,
    pub industry: String,
    pub location: String,
    pub rating: u8,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct SessionState {
    chat: Vec<ChatTurn>,
    bookmarks: Vec<Bookmark>,
}

/// In-memory session store keyed by session id. Cloning shares the map.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionState>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty session and returns its id.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.write().await.insert(id, SessionState::default());
        id
    }

    pub async fn append_chat_turn(
        &self,
        session_id: Uuid,
        turn: ChatTurn,
    ) -> Result<(), AppError> {
        let mut sessions = self.inner.write().await;
        let session = sessions
            .get_mut(&session_id)
            .ok_or_else(|| not_found(session_id))?;
        session.chat.push(turn);
        Ok(())
    }

    pub async fn append_bookmark(
        &self,
        session_id: Uuid,
        bookmark: Bookmark,
    ) -> Result<(), AppError> {
        let mut sessions = self.inner.write().await;
        let session = sessions
            .get_mut(&session_id)
            .ok_or_else(|| not_found(session_id))?;
        session.bookmarks.push(bookmark);
        Ok(())
    }

    pub async fn chat_history(&self, session_id: Uuid) -> Result<Vec<ChatTurn>, AppError> {
        let sessions = self.inner.read().await;
        sessions
            .get(&session_id)
            .map(|s| s.chat.clone())
            .ok_or_else(|| not_found(session_id))
    }

    pub async fn bookmarks(&self, session_id: Uuid) -> Result<Vec<Bookmark>, AppError> {
        let sessions = self.inner.read().await;
        sessions
            .get(&session_id)
            .map(|s| s.bookmarks.clone())
            .ok_or_else(|| not_found(session_id))
    }
}

fn not_found(session_id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {session_id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bookmark(title: &str, rating: u8) -> Bookmark {
        Bookmark {
            job_title: title.to_string(),
            industry: "Tech".to_string(),
            location: "Remote".to_string(),
            rating,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_new_session_is_empty() {
        let store = SessionStore::new();
        let id = store.create().await;

        assert!(store.chat_history(id).await.unwrap().is_empty());
        assert!(store.bookmarks(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chat_turns_replay_in_append_order() {
        let store = SessionStore::new();
        let id = store.create().await;

        for (sender, message) in [
            (Sender::User, "hello"),
            (Sender::Assistant, "hi there"),
            (Sender::User, "recommend something"),
        ] {
            store
                .append_chat_turn(
                    id,
                    ChatTurn {
                        sender,
                        message: message.to_string(),
                    },
                )
                .await
                .unwrap();
        }

        let history = store.chat_history(id).await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].message, "hello");
        assert_eq!(history[1].sender, Sender::Assistant);
        assert_eq!(history[2].message, "recommend something");
    }

    #[tokio::test]
    async fn test_bookmarking_twice_appends_two_entries() {
        let store = SessionStore::new();
        let id = store.create().await;

        store
            .append_bookmark(id, make_bookmark("Data Analyst", 4))
            .await
            .unwrap();
        store
            .append_bookmark(id, make_bookmark("Data Analyst", 5))
            .await
            .unwrap();

        let bookmarks = store.bookmarks(id).await.unwrap();
        assert_eq!(bookmarks.len(), 2);
        assert_eq!(bookmarks[0].rating, 4);
        assert_eq!(bookmarks[1].rating, 5);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let first = store.create().await;
        let second = store.create().await;

        store
            .append_bookmark(first, make_bookmark("ML Engineer", 5))
            .await
            .unwrap();

        assert_eq!(store.bookmarks(first).await.unwrap().len(), 1);
        assert!(store.bookmarks(second).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let store = SessionStore::new();
        let unknown = Uuid::new_v4();

        assert!(matches!(
            store.chat_history(unknown).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store
                .append_bookmark(unknown, make_bookmark("X", 3))
                .await,
            Err(AppError::NotFound(_))
        ));
    }
}
