//! Chat session HTTP handlers.
//!
//! Endpoints:
//! - POST /api/chat/sessions      - Create a session
//! - GET  /api/chat/sessions      - List sessions, most recently updated first
//! - GET  /api/chat/sessions/{id} - Get a single session

use axum::extract::{Path, State};

use sada_types::chat::{ChatSession, NewChatSession};

use crate::http::error::AppError;
use crate::http::extractors::Json;
use crate::http::handlers::parse_uuid;
use crate::state::AppState;

/// POST /api/chat/sessions - Create a session.
pub async fn create_chat_session(
    State(state): State<AppState>,
    Json(input): Json<NewChatSession>,
) -> Result<axum::Json<ChatSession>, AppError> {
    let session = state
        .chat_service
        .create_session(input)
        .await
        .map_err(AppError::chat)?;

    Ok(axum::Json(session))
}

/// GET /api/chat/sessions - List sessions.
pub async fn get_chat_sessions(
    State(state): State<AppState>,
) -> Result<axum::Json<Vec<ChatSession>>, AppError> {
    let sessions = state
        .chat_service
        .list_sessions()
        .await
        .map_err(AppError::chat)?;

    Ok(axum::Json(sessions))
}

/// GET /api/chat/sessions/{id} - Get a session by ID.
pub async fn get_chat_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<axum::Json<ChatSession>, AppError> {
    let sid = parse_uuid(&session_id)?;

    let session = state
        .chat_service
        .get_session(&sid)
        .await
        .map_err(AppError::chat)?;

    Ok(axum::Json(session))
}
