//! API Documentation module
//!
//! Provides OpenAPI specification generation for the proxy using utoipa.

mod openapi;

pub use openapi::ProxyApiDoc;
