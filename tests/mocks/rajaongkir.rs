//! Mock RajaOngkir API for testing
//!
//! Provides wiremock-based mocks for the Komerce RajaOngkir endpoints:
//! - GET /destination/domestic-destination - Destination search
//! - POST /calculate/domestic-cost - Shipping cost calculation
//!
//! # Example
//!
//! ```rust,ignore
//! let upstream = MockRajaOngkir::start().await;
//! upstream.mock_destinations_success(RajaOngkirTestData::destinations()).await;
//! // Use upstream.uri() as RAJA_ONGKIR_BASE_URL
//! ```

#![allow(dead_code)]

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

use crate::common::constants::TEST_API_KEY;

pub const DESTINATIONS_PATH: &str = "/destination/domestic-destination";
pub const CALCULATE_PATH: &str = "/calculate/domestic-cost";

/// Mock RajaOngkir server wrapper
pub struct MockRajaOngkir {
    server: MockServer,
}

impl MockRajaOngkir {
    /// Start a new mock RajaOngkir server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get the mock server URI
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Access the underlying server for custom mocks
    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// All requests received so far
    pub async fn received(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    // =========================================================================
    // GET /destination/domestic-destination
    // =========================================================================

    /// Mock a successful destination search (requires the API key)
    pub async fn mock_destinations_success(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path(DESTINATIONS_PATH))
            .and(header("key", TEST_API_KEY))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mock a destination search failing with the given status
    pub async fn mock_destinations_status(&self, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path(DESTINATIONS_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mock a destination search that answers after `delay`
    pub async fn mock_destinations_delayed(&self, delay: Duration) {
        Mock::given(method("GET"))
            .and(path(DESTINATIONS_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(RajaOngkirTestData::destinations())
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    // =========================================================================
    // POST /calculate/domestic-cost
    // =========================================================================

    /// Mock a successful cost calculation (requires key and form encoding)
    pub async fn mock_calculate_success(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path(CALCULATE_PATH))
            .and(header("key", TEST_API_KEY))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mock a cost calculation failing with the given status
    pub async fn mock_calculate_status(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(CALCULATE_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mock a cost calculation that answers after `delay`
    pub async fn mock_calculate_delayed(&self, delay: Duration) {
        Mock::given(method("POST"))
            .and(path(CALCULATE_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(RajaOngkirTestData::costs())
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Fail the test on drop if any request reaches the upstream
    pub async fn expect_no_requests(&self) {
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }
}

/// Sample upstream payloads
pub struct RajaOngkirTestData;

impl RajaOngkirTestData {
    /// Destination search result
    pub fn destinations() -> Value {
        json!({
            "meta": {"message": "Success Get Domestic Destinations", "code": 200, "status": "success"},
            "data": [
                {
                    "id": 17549,
                    "label": "GAMBIR, GAMBIR, JAKARTA PUSAT, DKI JAKARTA, 10110",
                    "province_name": "DKI JAKARTA",
                    "city_name": "JAKARTA PUSAT",
                    "district_name": "GAMBIR",
                    "subdistrict_name": "GAMBIR",
                    "zip_code": "10110"
                }
            ]
        })
    }

    /// Cost calculation result
    pub fn costs() -> Value {
        json!({
            "meta": {"message": "Success Calculate Domestic Shipping cost", "code": 200, "status": "success"},
            "data": [
                {
                    "name": "Jalur Nugraha Ekakurir (JNE)",
                    "code": "jne",
                    "service": "REG",
                    "description": "Layanan Reguler",
                    "cost": 18000,
                    "etd": "2 day"
                }
            ]
        })
    }

    /// Upstream validation failure
    pub fn unprocessable() -> Value {
        json!({
            "meta": {"message": "Invalid courier code", "code": 422, "status": "error"},
            "data": null
        })
    }
}
