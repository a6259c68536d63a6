//! Prometheus metrics endpoint
//!
//! Exposes application metrics in Prometheus format for monitoring.

use std::time::Instant;

use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;

use crate::error::AppResult;

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

/// Register all custom metrics
fn register_metrics() {
    metrics::describe_counter!(
        "ongkir_requests_total",
        "Total number of proxy requests processed"
    );
    metrics::describe_histogram!(
        "ongkir_upstream_duration_seconds",
        "Proxy request duration in seconds, upstream call included"
    );
}

/// Prometheus metrics endpoint handler
///
/// Returns metrics in Prometheus text format for scraping.
pub async fn prometheus_metrics() -> impl IntoResponse {
    PROMETHEUS_HANDLE.render()
}

/// Record a request; `status` is `success` or an error kind
pub fn record_request(operation: &str, status: &str, duration_secs: f64) {
    metrics::counter!(
        "ongkir_requests_total",
        "operation" => operation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "ongkir_upstream_duration_seconds",
        "operation" => operation.to_string()
    )
    .record(duration_secs);
}

/// Record the outcome of a handler result
pub fn record_outcome<T>(operation: &str, result: &AppResult<T>, start: Instant) {
    let status = match result {
        Ok(_) => "success",
        Err(e) => e.kind(),
    };
    record_request(operation, status, start.elapsed().as_secs_f64());
}
