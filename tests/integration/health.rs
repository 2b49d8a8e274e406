//! Health endpoint integration tests
//!
//! Tests for the health check endpoints:
//! - GET /health - Health summary with session statistics
//! - GET /health/ready - Readiness probe
//! - GET /health/live - Liveness probe

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use career_companion::{model::ChatModel, routes, AppState, Config};
use serde_json::{json, Value};

use crate::common::{offline_config, success, ScriptedModel};

fn create_test_server(config: Config) -> (TestServer, Arc<ScriptedModel>) {
    let model = ScriptedModel::new(vec![success("Keep learning.")]);
    let chat_model: Arc<dyn ChatModel> = model.clone();
    let state = Arc::new(AppState::with_model(config, chat_model));
    let server = TestServer::new(routes::create_router(state)).expect("Failed to create test server");
    (server, model)
}

#[tokio::test]
async fn test_health_endpoint_returns_proper_structure() {
    let (server, _) = create_test_server(offline_config());

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["uptime_seconds"].is_u64());
    assert!(body["timestamp"].is_string());
    assert_eq!(body["stats"]["history_len"], 0);
}

#[tokio::test]
async fn test_health_counts_history_without_calling_model() {
    let (server, model) = create_test_server(offline_config());

    server
        .post("/api/session/ask")
        .json(&json!({"question": "What next?"}))
        .await
        .assert_status_ok();

    let body: Value = server.get("/health").await.json();
    assert_eq!(body["stats"]["history_len"], 1);
    assert_eq!(model.questions().len(), 1);
}

#[tokio::test]
async fn test_liveness_probe() {
    let (server, _) = create_test_server(offline_config());

    let response = server.get("/health/live").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!({"status": "healthy"}));
}

#[tokio::test]
async fn test_readiness_probe_when_configured() {
    let (server, _) = create_test_server(offline_config());

    let response = server.get("/health/ready").await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_readiness_probe_without_deployment_id() {
    let mut config = offline_config();
    config.deployment_id = "  ".to_string();
    let (server, _) = create_test_server(config);

    let response = server.get("/health/ready").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["status"], "unhealthy");
}

#[tokio::test]
async fn test_metrics_endpoint_serves_prometheus_text() {
    routes::metrics::init_metrics();
    let (server, _) = create_test_server(offline_config());

    server
        .post("/api/session/ask")
        .json(&json!({"question": "What next?"}))
        .await
        .assert_status_ok();

    let response = server.get("/metrics").await;

    response.assert_status_ok();
    assert!(response.text().contains("companion_asks_total"));
}
