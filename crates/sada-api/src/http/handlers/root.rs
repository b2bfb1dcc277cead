//! Service banner and health endpoints.

use axum::Json;
use serde_json::{Value, json};

/// GET /api/ - Service banner.
pub async fn api_root() -> Json<Value> {
    Json(json!({
        "message": "SaDA AI - Smart Document Analysis & Customer Support API"
    }))
}

/// GET /health - Simple health check endpoint.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
