//! Shipping cost endpoint

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult},
    proxy::ShippingCostRequest,
    response::ProxyResponse,
    routes::metrics::record_outcome,
    AppState,
};

/// Calculate domestic shipping cost
///
/// The body is parsed by hand so malformed or missing JSON still yields the
/// standard envelope instead of a plain-text rejection.
#[utoipa::path(
    post,
    path = "/api/rajaongkir/calculate",
    tag = "Shipping",
    request_body = ShippingCostRequest,
    responses(
        (status = 200, description = "Upstream cost list under `data`", body = ProxyResponse),
        (status = 400, description = "Missing or empty required fields", body = ProxyResponse),
        (status = 408, description = "Upstream too slow, retry", body = ProxyResponse),
        (status = 413, description = "Request body too large", body = ProxyResponse),
        (status = 500, description = "Missing API key or unexpected failure", body = ProxyResponse)
    )
)]
pub async fn calculate_cost(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ProxyResponse>, AppError> {
    let start_time = Instant::now();

    let result = match body {
        Ok(body) => calculate(&state, &body).await,
        Err(rejection) => Err(reject_body(rejection)),
    };
    record_outcome("calculate", &result, start_time);

    Ok(Json(ProxyResponse::ok(result?)))
}

async fn calculate(state: &AppState, body: &[u8]) -> AppResult<Value> {
    let request = parse_request(body)?;
    let form = request.into_form().map_err(|e| {
        warn!("Rejected shipping cost request with missing fields");
        e
    })?;

    info!(
        origin = %form.origin,
        destination = %form.destination,
        weight = %form.weight,
        courier = %form.courier,
        price = ?form.price,
        "Calculating shipping cost"
    );

    state.provider.calculate_cost(&form).await
}

fn reject_body(rejection: BytesRejection) -> AppError {
    warn!(error = %rejection.body_text(), "Rejected unreadable shipping cost body");
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::InvalidJson(rejection.body_text())
    }
}

/// An empty body reads as an empty request
fn parse_request(body: &[u8]) -> AppResult<ShippingCostRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ShippingCostRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "Rejected malformed shipping cost body");
        AppError::InvalidJson(e.to_string())
    })
}
