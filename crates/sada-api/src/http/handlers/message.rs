//! Multimodal chat message HTTP handlers.
//!
//! Endpoints:
//! - POST /api/chat/message                - Run one chat turn
//! - GET  /api/chat/messages/{session_id}  - List a session's messages

use axum::extract::{Path, State};

use sada_types::chat::{ChatMessage, NewChatMessage};

use crate::http::error::AppError;
use crate::http::extractors::Json;
use crate::http::handlers::parse_uuid;
use crate::state::AppState;

/// POST /api/chat/message - Run one chat turn through the model and
/// persist the exchange.
pub async fn send_chat_message(
    State(state): State<AppState>,
    Json(input): Json<NewChatMessage>,
) -> Result<axum::Json<ChatMessage>, AppError> {
    let message = state
        .chat_service
        .post_message(input)
        .await
        .map_err(AppError::chat)?;

    Ok(axum::Json(message))
}

/// GET /api/chat/messages/{session_id} - List messages chronologically.
pub async fn get_chat_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<axum::Json<Vec<ChatMessage>>, AppError> {
    let sid = parse_uuid(&session_id)?;

    let messages = state
        .chat_service
        .list_messages(&sid)
        .await
        .map_err(AppError::chat)?;

    Ok(axum::Json(messages))
}
