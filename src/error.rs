//! Error types for the shipping proxy
//!
//! Every failure is terminal for the current request and is rendered as a
//! [`ProxyResponse`] envelope with a matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use thiserror::Error;

use crate::response::ProxyResponse;

/// Message used for every client-facing 500
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Server configuration error: API key not found")]
    MissingApiKey,

    #[error("{0}")]
    Validation(String),

    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("{0}")]
    UpstreamTimeout(&'static str),

    #[error("Upstream rejected request with status {status}")]
    UpstreamRejected { status: StatusCode, body: Value },

    #[error("Unexpected upstream failure: {detail}")]
    Unexpected {
        detail: String,
        /// Echo `detail` to the caller (non-production only)
        expose: bool,
    },

    #[error("Endpoint not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) | AppError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::UpstreamTimeout(_) => StatusCode::REQUEST_TIMEOUT,
            AppError::UpstreamRejected { status, .. } => *status,
            AppError::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MissingApiKey => "config",
            AppError::Validation(_) | AppError::InvalidJson(_) => "validation",
            AppError::PayloadTooLarge => "too_large",
            AppError::UpstreamTimeout(_) => "timeout",
            AppError::UpstreamRejected { .. } => "upstream",
            AppError::Unexpected { .. } | AppError::Internal(_) => "internal",
            AppError::NotFound => "not_found",
        }
    }

    fn envelope(self) -> ProxyResponse {
        match self {
            AppError::MissingApiKey
            | AppError::Validation(_)
            | AppError::PayloadTooLarge
            | AppError::NotFound => {
                ProxyResponse::failure(self.to_string())
            }
            AppError::InvalidJson(_) => ProxyResponse::failure("Invalid JSON body"),
            AppError::UpstreamTimeout(message) => ProxyResponse::failure(message),
            AppError::UpstreamRejected { body, .. } => {
                ProxyResponse::failure("API Error").with_error(body)
            }
            AppError::Unexpected { detail, expose } => {
                let error = if expose { detail } else { "Server error".to_string() };
                ProxyResponse::failure(INTERNAL_ERROR_MESSAGE).with_error(Value::String(error))
            }
            AppError::Internal(_) => ProxyResponse::failure(INTERNAL_ERROR_MESSAGE),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self.envelope())).into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
