//! ChatRepository trait definition.
//!
//! Persistence operations for chat sessions and messages. Note the narrow
//! update surface: the only mutation after creation is the session's
//! `updated_at` touch.

use chrono::{DateTime, Utc};
use sada_types::chat::{ChatMessage, ChatSession};
use sada_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for chat session and message persistence.
///
/// Implementations live in sada-infra (e.g., `SqliteChatRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ChatRepository: Send + Sync {
    /// Persist a new chat session.
    fn create_session(
        &self,
        session: &ChatSession,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a chat session by its unique ID.
    fn get_session(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// List sessions ordered by `updated_at` DESC, capped at `limit`.
    fn list_sessions(
        &self,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<ChatSession>, RepositoryError>> + Send;

    /// Set a session's `updated_at`.
    ///
    /// Touching a session that does not exist affects zero rows and is
    /// NOT an error -- orphaned message writes are tolerated.
    fn touch_session(
        &self,
        session_id: &Uuid,
        updated_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Persist a new message. Messages are immutable after creation.
    fn save_message(
        &self,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List a session's messages ordered by `timestamp` ASC, capped at `limit`.
    fn list_messages(
        &self,
        session_id: &Uuid,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;
}
