//! Application error type mapping to HTTP status codes.
//!
//! Every error response carries the same `{"detail": "..."}` body shape.
//! Failure causes are not distinguished to the caller beyond the status
//! code and the detail string.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use sada_types::error::{AnalysisError, ChatError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Malformed request shape; rejected before reaching the services.
    Validation(String),
    /// A referenced entity does not exist.
    NotFound(String),
    /// Anything else; the original cause rides in the detail string.
    Internal(String),
}

impl AppError {
    /// Wrap a chat failure, prefixing the endpoint's failure banner.
    pub fn chat(err: ChatError) -> Self {
        match err {
            ChatError::SessionNotFound => AppError::NotFound("Session not found".to_string()),
            other => AppError::Internal(format!("Chat failed: {other}")),
        }
    }

    /// Wrap an analysis failure, prefixing the endpoint's failure banner.
    pub fn analysis(err: AnalysisError) -> Self {
        match err {
            AnalysisError::SessionNotFound => AppError::NotFound("Session not found".to_string()),
            other => AppError::Internal(format!("Analysis failed: {other}")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Validation(detail) => (StatusCode::BAD_REQUEST, detail),
            AppError::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
            AppError::Internal(detail) => (StatusCode::INTERNAL_SERVER_ERROR, detail),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
