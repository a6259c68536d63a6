//! Middleware module
//!
//! Contains Tower middleware applied to the proxy routes.

pub mod api_key;
