//! Structured logging for upstream calls
//!
//! Each call to RajaOngkir gets a short trace id so the request, response and
//! failure lines of one call can be correlated.

use std::time::Instant;
use tracing::{debug, error, info, warn, Span};
use uuid::Uuid;

/// Context for tracking one upstream call
#[derive(Debug, Clone)]
pub struct UpstreamCall {
    /// Unique identifier for this call (for log correlation)
    pub trace_id: String,
    /// When the call started
    pub start_time: Instant,
    /// Logical operation (`destinations`, `calculate`, `passthrough`)
    pub operation: String,
    /// Timeout applied to the call
    pub timeout_ms: u64,
}

impl UpstreamCall {
    /// Create a new upstream call context
    pub fn new(operation: &str, timeout_ms: u64) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string()[..8].to_string(),
            start_time: Instant::now(),
            operation: operation.to_string(),
            timeout_ms,
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }

    /// Log request being sent to upstream
    ///
    /// `url` must not carry the API key; it travels in a header.
    pub fn log_upstream_request(&self, method: &str, url: &str, body_size: Option<usize>) {
        debug!(
            trace_id = %self.trace_id,
            operation = %self.operation,
            method = %method,
            url = %url,
            body_size = ?body_size,
            timeout_ms = %self.timeout_ms,
            "Sending request to RajaOngkir"
        );
    }

    /// Log response received from upstream
    pub fn log_upstream_response(&self, status: u16, body_size: usize) {
        info!(
            trace_id = %self.trace_id,
            operation = %self.operation,
            status = %status,
            body_size = %body_size,
            elapsed_ms = %self.elapsed_ms(),
            "Response received from RajaOngkir"
        );
    }

    /// Log an upstream rejection (non-2xx)
    pub fn log_rejected(&self, status: u16) {
        warn!(
            trace_id = %self.trace_id,
            operation = %self.operation,
            status = %status,
            elapsed_ms = %self.elapsed_ms(),
            "RajaOngkir rejected request"
        );
    }

    /// Log timeout
    pub fn log_timeout(&self) {
        error!(
            trace_id = %self.trace_id,
            operation = %self.operation,
            timeout_ms = %self.timeout_ms,
            elapsed_ms = %self.elapsed_ms(),
            "RajaOngkir request timed out"
        );
    }

    /// Log connection or protocol failure
    pub fn log_error(&self, error: &str) {
        error!(
            trace_id = %self.trace_id,
            operation = %self.operation,
            elapsed_ms = %self.elapsed_ms(),
            error = %error,
            "RajaOngkir request failed"
        );
    }

    /// Create a tracing span for this call
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "rajaongkir_call",
            trace_id = %self.trace_id,
            operation = %self.operation,
        )
    }
}
