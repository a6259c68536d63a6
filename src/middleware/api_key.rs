//! API key guard
//!
//! Rejects proxy requests with a configuration error before any validation
//! or upstream call happens when no RajaOngkir key is configured.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{error, instrument};

use crate::{error::AppError, AppState};

/// Require a configured upstream API key
#[instrument(skip_all, fields(path = %request.uri().path()))]
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !state.provider.is_configured() {
        error!(
            provider = state.provider.name(),
            "RAJA_ONGKIR_API_KEY is not configured"
        );
        return Err(AppError::MissingApiKey);
    }

    Ok(next.run(request).await)
}
