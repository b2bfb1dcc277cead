//! Document analysis HTTP handlers.
//!
//! Endpoints:
//! - POST /api/documents/analyze               - Analyze a document
//! - GET  /api/documents/analyses              - List analyses
//! - GET  /api/documents/analyses/{session_id} - List a session's analyses

use axum::extract::{Path, State};

use sada_types::analysis::{DocumentAnalysis, NewDocumentAnalysis};

use crate::http::error::AppError;
use crate::http::extractors::Json;
use crate::http::handlers::parse_uuid;
use crate::state::AppState;

/// POST /api/documents/analyze - Analyze one document and persist the
/// result.
pub async fn analyze_document(
    State(state): State<AppState>,
    Json(input): Json<NewDocumentAnalysis>,
) -> Result<axum::Json<DocumentAnalysis>, AppError> {
    let analysis = state
        .analysis_service
        .analyze_document(input)
        .await
        .map_err(AppError::analysis)?;

    Ok(axum::Json(analysis))
}

/// GET /api/documents/analyses - List analyses, most recent first.
pub async fn get_document_analyses(
    State(state): State<AppState>,
) -> Result<axum::Json<Vec<DocumentAnalysis>>, AppError> {
    let analyses = state
        .analysis_service
        .list_analyses()
        .await
        .map_err(AppError::analysis)?;

    Ok(axum::Json(analyses))
}

/// GET /api/documents/analyses/{session_id} - List one session's analyses.
pub async fn get_session_analyses(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<axum::Json<Vec<DocumentAnalysis>>, AppError> {
    let sid = parse_uuid(&session_id)?;

    let analyses = state
        .analysis_service
        .list_session_analyses(&sid)
        .await
        .map_err(AppError::analysis)?;

    Ok(axum::Json(analyses))
}
