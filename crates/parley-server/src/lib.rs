//! Parley Server - REST API for the Q&A service
//!
//! Thin HTTP adapter over the orchestrator: request validation, error-code
//! mapping, and JSON shapes live here; all conversation logic lives in the
//! crates below.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub mod handlers;
pub mod models;
pub mod state;

pub use state::AppState;

/// Build the service router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/v1/ask", post(handlers::ask))
        .route("/api/v1/sessions", get(handlers::list_sessions))
        .route(
            "/api/v1/sessions/:session_id/history",
            get(handlers::session_history),
        )
        .route("/api/v1/sessions/:session_id", delete(handlers::clear_session))
        .route("/api/v1/tools", get(handlers::list_tools))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
