//! Ongkir Proxy - shipping-cost proxy for the RajaOngkir API
//!
//! This library provides the core functionality for the proxy server. It
//! keeps the RajaOngkir API key on the server, validates storefront requests
//! and relays upstream responses in a uniform JSON envelope.

pub mod config;
pub mod docs;
pub mod error;
pub mod middleware;
pub mod proxy;
pub mod response;
pub mod routes;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

pub use crate::config::{Config, Environment, ProxyMode};
pub use crate::proxy::{RajaOngkirClient, ShippingProvider};
pub use crate::response::ProxyResponse;

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
    /// Shipping provider requests are forwarded to
    pub provider: Arc<dyn ShippingProvider>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        // Per-request timeouts are applied by the client methods
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(32)
            .build()?;

        let provider: Arc<dyn ShippingProvider> =
            Arc::new(RajaOngkirClient::new(http_client, &config));

        Ok(Self::with_provider(config, provider))
    }

    /// Create application state around an existing provider
    pub fn with_provider(config: Config, provider: Arc<dyn ShippingProvider>) -> Self {
        Self {
            config,
            start_time: Instant::now(),
            provider,
        }
    }
}
