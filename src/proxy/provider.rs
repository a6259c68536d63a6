//! Shipping provider abstraction layer
//!
//! Handlers only see this trait, so the upstream client is constructed once
//! at startup and injected through application state.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Response};
use serde_json::Value;

use crate::error::AppResult;
use crate::proxy::types::{CostForm, DestinationQuery};

/// Trait defining the interface for shipping-rate providers
///
/// # Security
///
/// Implementations MUST:
/// - Never forward caller credentials or cookies upstream
/// - Use the provider API key from configuration
/// - Build forwarded headers from the allow-list in `headers.rs`
#[async_trait]
pub trait ShippingProvider: Send + Sync {
    /// Get the provider name for logging and metrics
    fn name(&self) -> &'static str;

    /// Whether an API key is configured
    fn is_configured(&self) -> bool;

    /// Search domestic destinations
    ///
    /// Returns the upstream JSON body on success.
    async fn list_destinations(&self, query: &DestinationQuery) -> AppResult<Value>;

    /// Calculate domestic shipping cost
    ///
    /// Returns the upstream JSON body on success.
    async fn calculate_cost(&self, form: &CostForm) -> AppResult<Value>;

    /// Forward a raw request (pass-through)
    ///
    /// `path_and_query` is appended to the provider base URL. The upstream
    /// status and body are relayed as-is.
    async fn forward_raw(
        &self,
        method: Method,
        path_and_query: &str,
        incoming_headers: &HeaderMap,
        body: Body,
    ) -> AppResult<Response<Body>>;
}
