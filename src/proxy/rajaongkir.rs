//! RajaOngkir (Komerce) API client
//!
//! Injects the server-held API key, applies per-operation timeouts and maps
//! upstream failures onto [`AppError`].

use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Response};
use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use serde_json::Value;
use tracing::Instrument;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    proxy::{
        headers::{build_default_headers, build_forward_headers, filter_response_headers},
        logging::UpstreamCall,
        provider::ShippingProvider,
        types::{CostForm, DestinationQuery},
    },
};

/// Largest request body forwarded by the pass-through proxy
pub const MAX_PASSTHROUGH_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Timeout message for destination search and pass-through
pub const DESTINATIONS_TIMEOUT_MESSAGE: &str = "Request timeout - API took too long to respond";
/// Timeout message for cost calculation
pub const CALCULATE_TIMEOUT_MESSAGE: &str = "Request timeout - Calculation took too long";

const DESTINATIONS_PATH: &str = "/destination/domestic-destination";
const CALCULATE_PATH: &str = "/calculate/domestic-cost";

/// RajaOngkir client
pub struct RajaOngkirClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    destinations_timeout: Duration,
    calculate_timeout: Duration,
    passthrough_timeout: Duration,
    expose_errors: bool,
}

impl RajaOngkirClient {
    /// Create a new RajaOngkir client
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.rajaongkir_base_url.trim_end_matches('/').to_string(),
            api_key: config.rajaongkir_api_key.clone(),
            destinations_timeout: config.destinations_timeout,
            calculate_timeout: config.calculate_timeout,
            passthrough_timeout: config.passthrough_timeout,
            expose_errors: config.environment.exposes_error_details(),
        }
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key.as_deref().ok_or(AppError::MissingApiKey)
    }

    /// Map a transport error onto the client-facing taxonomy
    fn classify(
        &self,
        call: &UpstreamCall,
        err: reqwest::Error,
        timeout_message: &'static str,
    ) -> AppError {
        if err.is_timeout() {
            call.log_timeout();
            AppError::UpstreamTimeout(timeout_message)
        } else {
            call.log_error(&err.to_string());
            AppError::Unexpected {
                detail: err.to_string(),
                expose: self.expose_errors,
            }
        }
    }

    /// Read an upstream response, failing on non-2xx
    async fn read_json(
        &self,
        call: &UpstreamCall,
        response: reqwest::Response,
        timeout_message: &'static str,
    ) -> AppResult<Value> {
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.classify(call, e, timeout_message))?;

        call.log_upstream_response(status.as_u16(), bytes.len());
        let body = parse_body(&bytes);

        if !status.is_success() {
            call.log_rejected(status.as_u16());
            return Err(AppError::UpstreamRejected { status, body });
        }

        Ok(body)
    }
}

/// Decode an upstream body, falling back to a JSON string for non-JSON payloads
pub fn parse_body(bytes: &Bytes) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

fn timeout_ms(timeout: Duration) -> u64 {
    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
}

#[async_trait]
impl ShippingProvider for RajaOngkirClient {
    fn name(&self) -> &'static str {
        "rajaongkir"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn list_destinations(&self, query: &DestinationQuery) -> AppResult<Value> {
        let api_key = self.api_key()?;
        let call = UpstreamCall::new("destinations", timeout_ms(self.destinations_timeout));
        let url = format!("{}{}", self.base_url, DESTINATIONS_PATH);

        async {
            call.log_upstream_request("GET", &url, None);

            let response = self
                .client
                .get(&url)
                .headers(build_default_headers(api_key)?)
                .query(&query.to_params())
                .timeout(self.destinations_timeout)
                .send()
                .await
                .map_err(|e| self.classify(&call, e, DESTINATIONS_TIMEOUT_MESSAGE))?;

            self.read_json(&call, response, DESTINATIONS_TIMEOUT_MESSAGE)
                .await
        }
        .instrument(call.create_span())
        .await
    }

    async fn calculate_cost(&self, form: &CostForm) -> AppResult<Value> {
        let api_key = self.api_key()?;
        let call = UpstreamCall::new("calculate", timeout_ms(self.calculate_timeout));
        let url = format!("{}{}", self.base_url, CALCULATE_PATH);

        async {
            call.log_upstream_request("POST", &url, None);

            // `.form` sets content-type: application/x-www-form-urlencoded
            let response = self
                .client
                .post(&url)
                .headers(build_default_headers(api_key)?)
                .form(&form.to_pairs())
                .timeout(self.calculate_timeout)
                .send()
                .await
                .map_err(|e| self.classify(&call, e, CALCULATE_TIMEOUT_MESSAGE))?;

            self.read_json(&call, response, CALCULATE_TIMEOUT_MESSAGE)
                .await
        }
        .instrument(call.create_span())
        .await
    }

    async fn forward_raw(
        &self,
        method: Method,
        path_and_query: &str,
        incoming_headers: &HeaderMap,
        body: Body,
    ) -> AppResult<Response<Body>> {
        let api_key = self.api_key()?;
        let call = UpstreamCall::new("passthrough", timeout_ms(self.passthrough_timeout));
        let url = format!("{}{}", self.base_url, path_and_query);
        let headers = build_forward_headers(incoming_headers, api_key)?;

        let body_bytes = Limited::new(body, MAX_PASSTHROUGH_BODY_BYTES)
            .collect()
            .await
            .map_err(|e| {
                if e.is::<LengthLimitError>() {
                    AppError::PayloadTooLarge
                } else {
                    AppError::Internal(anyhow::anyhow!("Failed to read request body: {}", e))
                }
            })?
            .to_bytes();

        async {
            call.log_upstream_request(method.as_str(), &url, Some(body_bytes.len()));

            let mut request_builder = self
                .client
                .request(method.clone(), &url)
                .headers(headers)
                .timeout(self.passthrough_timeout);

            // Only add body for methods that support it
            if method != Method::GET && method != Method::HEAD {
                request_builder = request_builder.body(body_bytes);
            }

            let response = request_builder
                .send()
                .await
                .map_err(|e| self.classify(&call, e, DESTINATIONS_TIMEOUT_MESSAGE))?;

            let status = response.status();
            let response_headers = filter_response_headers(response.headers());
            let bytes = response
                .bytes()
                .await
                .map_err(|e| self.classify(&call, e, DESTINATIONS_TIMEOUT_MESSAGE))?;

            call.log_upstream_response(status.as_u16(), bytes.len());
            if !status.is_success() {
                call.log_rejected(status.as_u16());
            }

            let mut builder = Response::builder().status(status);
            if let Some(headers) = builder.headers_mut() {
                headers.extend(response_headers);
            }

            builder
                .body(Body::from(bytes))
                .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build response: {}", e)))
        }
        .instrument(call.create_span())
        .await
    }
}
