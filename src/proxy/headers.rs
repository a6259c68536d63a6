//! Header utilities for upstream proxying
//!
//! Outbound requests are built from an allow-list so caller credentials,
//! cookies and host/origin headers never reach RajaOngkir.

use axum::http::header::{self, HeaderName};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

use crate::error::{AppError, AppResult};

/// Header RajaOngkir reads the API key from
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("key");

/// Caller headers copied onto pass-through requests
const FORWARDED_REQUEST_HEADERS: &[HeaderName] = &[
    header::CONTENT_TYPE,
    header::ACCEPT,
    header::ACCEPT_LANGUAGE,
    header::USER_AGENT,
];

/// Hop-by-hop headers that must never be forwarded
const HOP_BY_HOP_HEADERS: &[HeaderName] = &[
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

fn api_key_value(api_key: &str) -> AppResult<HeaderValue> {
    let mut value = HeaderValue::from_str(api_key).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("API key is not a valid header value: {}", e))
    })?;
    value.set_sensitive(true);
    Ok(value)
}

/// Build default headers for RajaOngkir requests
///
/// Only `accept` and the API key; request-specific headers such as the form
/// content type are set by the request builder.
pub fn build_default_headers(api_key: &str) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(API_KEY_HEADER, api_key_value(api_key)?);
    Ok(headers)
}

/// Build headers for a pass-through request
///
/// Copies allow-listed caller headers, then injects the API key. A missing
/// `accept` defaults to JSON.
pub fn build_forward_headers(incoming: &HeaderMap, api_key: &str) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    for name in FORWARDED_REQUEST_HEADERS {
        if let Some(value) = incoming.get(name) {
            headers.insert(name.clone(), value.clone());
        }
    }

    if !headers.contains_key(ACCEPT) {
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    }
    headers.insert(API_KEY_HEADER, api_key_value(api_key)?);

    Ok(headers)
}

/// Check if a header is a hop-by-hop header that should not be forwarded
pub fn is_hop_by_hop_header(name: &HeaderName) -> bool {
    HOP_BY_HOP_HEADERS.contains(name)
}

/// Filter hop-by-hop headers from an upstream response
///
/// `content-length` is dropped as well since the body is re-framed.
pub fn filter_response_headers(response_headers: &HeaderMap) -> HeaderMap {
    let mut filtered = HeaderMap::new();

    for (name, value) in response_headers {
        if !is_hop_by_hop_header(name) && *name != header::CONTENT_LENGTH {
            filtered.append(name.clone(), value.clone());
        }
    }

    filtered
}
