//! Health check endpoint
//!
//! `/health` reports process liveness only and never contacts RajaOngkir, so
//! it stays green while the upstream is down.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::AppState;

/// Message reported by a running proxy
pub const HEALTH_MESSAGE: &str = "RajaOngkir Proxy Service is running";

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
    /// RFC 3339 timestamp
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub environment: String,
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Proxy is running", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: HEALTH_MESSAGE.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        environment: state.config.environment.as_str().to_string(),
    })
}
