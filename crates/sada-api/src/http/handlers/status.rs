//! Status-check HTTP handlers.
//!
//! Endpoints:
//! - POST /api/status - Record a status check
//! - GET  /api/status - List recorded status checks

use axum::extract::State;
use chrono::Utc;
use uuid::Uuid;

use sada_core::status::StatusRepository;
use sada_types::status::{NewStatusCheck, StatusCheck};

use crate::http::error::AppError;
use crate::http::extractors::Json;
use crate::state::AppState;

/// Fixed page size for status-check listings.
const STATUS_PAGE_LIMIT: i64 = 1000;

/// POST /api/status - Record a status check.
pub async fn create_status_check(
    State(state): State<AppState>,
    Json(input): Json<NewStatusCheck>,
) -> Result<axum::Json<StatusCheck>, AppError> {
    let check = StatusCheck {
        id: Uuid::now_v7(),
        client_name: input.client_name,
        timestamp: Utc::now(),
    };

    state
        .status_repo
        .insert(&check)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(axum::Json(check))
}

/// GET /api/status - List status checks, newest first.
pub async fn get_status_checks(
    State(state): State<AppState>,
) -> Result<axum::Json<Vec<StatusCheck>>, AppError> {
    let checks = state
        .status_repo
        .list(STATUS_PAGE_LIMIT)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(axum::Json(checks))
}
