//! HTTP routes for Career Companion
//!
//! This module defines all HTTP endpoints exposed by the companion.

pub mod catalog;
pub mod debug;
pub mod docs;
pub mod health;
pub mod metrics;
pub mod session;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let docs_key = docs::DocsKey::new(state.config.docs_key.as_deref());

    let api_routes = Router::new()
        .route("/api/session", get(session::get_session))
        .route("/api/session/input", put(session::set_input))
        .route("/api/session/ask", post(session::ask))
        .route("/api/session/history", get(session::get_history))
        .route("/api/quick-questions", get(catalog::list_quick_questions))
        .route(
            "/api/quick-questions/:index",
            post(catalog::select_quick_question),
        )
        .route("/api/pathways", get(catalog::list_pathways))
        .route("/api/debug", get(debug::debug_info));

    // Public routes (health checks, metrics)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics::prometheus_metrics));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .merge(docs::create_docs_router(docs_key))
        // Global middleware (applied to all routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
