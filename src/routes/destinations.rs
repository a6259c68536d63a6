//! Destination search endpoint
//!
//! Looks up RajaOngkir location codes used as `origin`/`destination` in cost
//! calculations.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::{info, warn};

use crate::{
    error::AppError,
    proxy::DestinationQuery,
    response::ProxyResponse,
    routes::metrics::record_outcome,
    AppState,
};

/// Message returned for malformed pagination parameters
pub const INVALID_QUERY_MESSAGE: &str =
    "Invalid query parameters: limit and offset must be non-negative integers";

/// Search domestic destinations
#[utoipa::path(
    get,
    path = "/api/rajaongkir/destinations",
    tag = "Shipping",
    params(DestinationQuery),
    responses(
        (status = 200, description = "Upstream destination list under `data`", body = ProxyResponse),
        (status = 400, description = "Malformed limit/offset", body = ProxyResponse),
        (status = 408, description = "Upstream too slow, retry", body = ProxyResponse),
        (status = 500, description = "Missing API key or unexpected failure", body = ProxyResponse)
    )
)]
pub async fn list_destinations(
    State(state): State<Arc<AppState>>,
    query: Result<Query<DestinationQuery>, QueryRejection>,
) -> Result<Json<ProxyResponse>, AppError> {
    let start_time = Instant::now();

    let Query(query) = query.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected destination query");
        AppError::Validation(INVALID_QUERY_MESSAGE.to_string())
    })?;

    info!(
        search = ?query.search,
        limit = query.limit,
        offset = query.offset,
        "Searching destinations"
    );

    let result = state.provider.list_destinations(&query).await;
    record_outcome("destinations", &result, start_time);

    Ok(Json(ProxyResponse::ok(result?)))
}
