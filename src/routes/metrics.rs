//! Prometheus metrics endpoint
//!
//! Exposes application metrics in Prometheus format for monitoring.

use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: Lazy<PrometheusHandle> = Lazy::new(|| {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
});

/// Initialize metrics (call once at startup)
pub fn init_metrics() {
    // Force initialization of the lazy static
    let _ = &*PROMETHEUS_HANDLE;

    register_metrics();
}

fn register_metrics() {
    metrics::describe_counter!(
        "companion_asks_total",
        "Questions submitted, by outcome"
    );
    metrics::describe_histogram!(
        "companion_ask_duration_seconds",
        "Time from submission to recorded answer"
    );
    metrics::describe_counter!(
        "companion_token_fetches_total",
        "Bearer token exchanges with the identity endpoint"
    );
}

/// Prometheus metrics endpoint handler
pub async fn prometheus_metrics() -> impl IntoResponse {
    PROMETHEUS_HANDLE.render()
}

/// Record a submitted question
pub fn record_ask(outcome: &str, duration_secs: f64) {
    metrics::counter!("companion_asks_total", "outcome" => outcome.to_string()).increment(1);
    metrics::histogram!("companion_ask_duration_seconds", "outcome" => outcome.to_string())
        .record(duration_secs);
}
