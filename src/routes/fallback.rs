//! Fallback handlers
//!
//! Unmatched routes and handler panics both answer with the JSON envelope.

use std::any::Any;

use axum::{
    http::Uri,
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::error::AppError;

/// 404 for any route the router does not know
pub async fn not_found(uri: Uri) -> AppError {
    debug!(path = %uri.path(), "No route matched");
    AppError::NotFound
}

/// Convert a handler panic into a 500 without leaking its payload
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error!(panic = %detail, "Unhandled error in request handler");

    AppError::Internal(anyhow::anyhow!("handler panicked")).into_response()
}
