//! Common test utilities for the shipping proxy
//!
//! Shared fixtures and a harness that wires the real router to a mock
//! RajaOngkir server.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use ongkir_proxy::{routes, AppState, Config, Environment, ProxyMode, ShippingProvider};
use serde_json::{json, Value};

use crate::mocks::MockRajaOngkir;

/// Test configuration constants
pub mod constants {
    /// API key the proxy injects upstream
    pub const TEST_API_KEY: &str = "test-rajaongkir-key";
    /// Short timeout used by slow-upstream tests
    pub const SHORT_TIMEOUT: std::time::Duration = std::time::Duration::from_millis(200);
    /// Upstream delay comfortably past `SHORT_TIMEOUT`
    pub const SLOW_RESPONSE: std::time::Duration = std::time::Duration::from_secs(2);
}

/// Config pointing at a mock upstream
pub fn test_config(upstream_uri: &str) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        rajaongkir_base_url: upstream_uri.to_string(),
        rajaongkir_api_key: Some(constants::TEST_API_KEY.to_string()),
        environment: Environment::Test,
        ..Config::default()
    }
}

/// Build a test server around an arbitrary config
pub fn server_for(config: Config) -> TestServer {
    let state = Arc::new(AppState::new(config).expect("Failed to build app state"));
    TestServer::new(routes::create_router(state)).expect("Failed to create test server")
}

/// Build a test server around a custom provider
pub fn server_with_provider(config: Config, provider: Arc<dyn ShippingProvider>) -> TestServer {
    let state = Arc::new(AppState::with_provider(config, provider));
    TestServer::new(routes::create_router(state)).expect("Failed to create test server")
}

/// Test harness: real router plus mock RajaOngkir
///
/// # Example
///
/// ```ignore
/// let app = TestApp::new().await;
/// app.upstream.mock_destinations_success(RajaOngkirTestData::destinations()).await;
/// let response = app.server.get("/api/rajaongkir/destinations").await;
/// response.assert_status_ok();
/// ```
pub struct TestApp {
    pub server: TestServer,
    pub upstream: MockRajaOngkir,
}

impl TestApp {
    /// Validated mode with default timeouts
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Pass-through mode
    pub async fn passthrough() -> Self {
        Self::with_config(|config| config.proxy_mode = ProxyMode::PassThrough).await
    }

    /// Customise the config before the router is built
    pub async fn with_config<F>(customise: F) -> Self
    where
        F: FnOnce(&mut Config),
    {
        let upstream = MockRajaOngkir::start().await;
        let mut config = test_config(&upstream.uri());
        customise(&mut config);

        Self {
            server: server_for(config),
            upstream,
        }
    }

    /// Shorten every upstream timeout
    pub async fn with_short_timeouts() -> Self {
        Self::with_config(|config| {
            config.destinations_timeout = constants::SHORT_TIMEOUT;
            config.calculate_timeout = constants::SHORT_TIMEOUT;
            config.passthrough_timeout = constants::SHORT_TIMEOUT;
        })
        .await
    }
}

/// Sample request bodies
pub mod test_data {
    use super::*;

    /// Fully valid cost request
    pub fn valid_cost_request() -> Value {
        json!({
            "origin": "17549",
            "destination": "31555",
            "weight": 1000,
            "courier": "jne:pos"
        })
    }
}
