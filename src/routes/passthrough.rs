//! Pass-through proxy handler
//!
//! Generic handler that forwards every request under `/proxy-rajaongkir` to
//! the RajaOngkir base URL without validating the payload. Method, query
//! string and body are preserved; headers go through the allow-list.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{OriginalUri, State},
    http::{header::HeaderMap, Method},
    response::Response,
};
use tracing::info;

use crate::{error::AppError, routes::metrics::record_request, AppState};

/// Path prefix stripped before forwarding
pub const PASSTHROUGH_PREFIX: &str = "/proxy-rajaongkir";

/// Upstream path (with query string) for an incoming request URI
pub fn forward_path(path: &str, query: Option<&str>) -> String {
    let remainder = path.strip_prefix(PASSTHROUGH_PREFIX).unwrap_or(path);
    match query {
        Some(query) => format!("{}?{}", remainder, query),
        None => remainder.to_string(),
    }
}

/// Pass-through handler for all `/proxy-rajaongkir/*` requests
pub async fn passthrough_handler(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    method: Method,
    headers: HeaderMap,
    request: axum::extract::Request,
) -> Result<Response, AppError> {
    let start_time = Instant::now();
    let path = uri.path().to_string();
    let forward_path = forward_path(&path, uri.query());

    info!(
        method = %method,
        path = %path,
        forward_path = %forward_path,
        "Processing pass-through request"
    );

    let body = request.into_body();

    let result = state
        .provider
        .forward_raw(method.clone(), &forward_path, &headers, body)
        .await;

    let duration = start_time.elapsed().as_secs_f64();
    let response = match result {
        Ok(response) => response,
        Err(e) => {
            record_request("passthrough", e.kind(), duration);
            return Err(e);
        }
    };

    let outcome = if response.status().is_success() {
        "success"
    } else {
        "upstream"
    };
    record_request("passthrough", outcome, duration);

    info!(
        method = %method,
        path = %path,
        status = %response.status(),
        duration_ms = %format!("{:.2}", duration * 1000.0),
        "Pass-through request completed"
    );

    Ok(response)
}
