//! Axum router configuration with middleware.
//!
//! All API routes are under `/api`; `/health` sits at the root.
//! Middleware: fully-open CORS (the service fronts a trusted SPA),
//! request tracing, and a raised body limit for document uploads.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Uploads and inline base64 documents can be large; 25 MiB covers the
/// documents the analysis path is meant for.
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/", get(handlers::root::api_root))
        // Status checks
        .route(
            "/status",
            post(handlers::status::create_status_check).get(handlers::status::get_status_checks),
        )
        // Chat sessions
        .route(
            "/chat/sessions",
            post(handlers::session::create_chat_session).get(handlers::session::get_chat_sessions),
        )
        .route("/chat/sessions/{id}", get(handlers::session::get_chat_session))
        // Chat messages
        .route("/chat/message", post(handlers::message::send_chat_message))
        .route(
            "/chat/messages/{session_id}",
            get(handlers::message::get_chat_messages),
        )
        // Document analysis
        .route(
            "/documents/analyze",
            post(handlers::analysis::analyze_document),
        )
        .route(
            "/documents/analyses",
            get(handlers::analysis::get_document_analyses),
        )
        .route(
            "/documents/analyses/{session_id}",
            get(handlers::analysis::get_session_analyses),
        )
        // File upload
        .route("/upload", post(handlers::upload::upload_file));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::root::health_check))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
