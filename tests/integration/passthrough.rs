//! Pass-through mode integration tests

use axum::http::{header, HeaderValue, StatusCode};
use bytes::Bytes;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_string, header as header_matcher, method, path, query_param},
    Mock, ResponseTemplate,
};

use crate::common::{
    constants::{SLOW_RESPONSE, TEST_API_KEY},
    TestApp,
};
use crate::mocks::{RajaOngkirTestData, CALCULATE_PATH, DESTINATIONS_PATH};

#[tokio::test]
async fn test_passthrough_forwards_get_with_query() {
    let app = TestApp::passthrough().await;
    Mock::given(method("GET"))
        .and(path(DESTINATIONS_PATH))
        .and(query_param("search", "bandung"))
        .and(header_matcher("key", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(RajaOngkirTestData::destinations()))
        .expect(1)
        .mount(app.upstream.server())
        .await;

    let response = app
        .server
        .get("/proxy-rajaongkir/destination/domestic-destination")
        .add_query_param("search", "bandung")
        .await;

    response.assert_status_ok();
    // Raw upstream body, no envelope
    let json: Value = response.json();
    assert_eq!(json, RajaOngkirTestData::destinations());
}

#[tokio::test]
async fn test_passthrough_preserves_method_and_body() {
    let app = TestApp::passthrough().await;
    let form = "origin=1&destination=2&weight=500&courier=jne";
    Mock::given(method("POST"))
        .and(path(CALCULATE_PATH))
        .and(body_string(form))
        .and(header_matcher("content-type", "application/x-www-form-urlencoded"))
        .respond_with(ResponseTemplate::new(200).set_body_json(RajaOngkirTestData::costs()))
        .expect(1)
        .mount(app.upstream.server())
        .await;

    let response = app
        .server
        .post("/proxy-rajaongkir/calculate/domestic-cost")
        .bytes(Bytes::from_static(form.as_bytes()))
        .content_type("application/x-www-form-urlencoded")
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_passthrough_strips_caller_credentials() {
    let app = TestApp::passthrough().await;
    Mock::given(method("GET"))
        .and(path(DESTINATIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(app.upstream.server())
        .await;

    app.server
        .get("/proxy-rajaongkir/destination/domestic-destination")
        .add_header(header::AUTHORIZATION, HeaderValue::from_static("Bearer user-jwt"))
        .add_header(header::COOKIE, HeaderValue::from_static("pb_auth=secret"))
        .add_header(header::ORIGIN, HeaderValue::from_static("https://shop.example.id"))
        .add_header(
            header::HeaderName::from_static("key"),
            HeaderValue::from_static("caller-key"),
        )
        .await
        .assert_status_ok();

    let requests = app.upstream.received().await;
    assert_eq!(requests.len(), 1);
    let headers = &requests[0].headers;
    assert_eq!(headers.get("key").unwrap().to_str().unwrap(), TEST_API_KEY);
    assert!(headers.get("authorization").is_none());
    assert!(headers.get("cookie").is_none());
    assert!(headers.get("origin").is_none());
}

#[tokio::test]
async fn test_passthrough_relays_upstream_error_status_and_body() {
    let app = TestApp::passthrough().await;
    app.upstream
        .mock_calculate_status(422, RajaOngkirTestData::unprocessable())
        .await;

    let response = app
        .server
        .post("/proxy-rajaongkir/calculate/domestic-cost")
        .text("origin=1")
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let json: Value = response.json();
    assert_eq!(json, RajaOngkirTestData::unprocessable());
}

#[tokio::test]
async fn test_passthrough_timeout_is_408() {
    let app = TestApp::with_config(|config| {
        config.proxy_mode = ongkir_proxy::ProxyMode::PassThrough;
        config.passthrough_timeout = crate::common::constants::SHORT_TIMEOUT;
    })
    .await;
    app.upstream.mock_destinations_delayed(SLOW_RESPONSE).await;

    let response = app
        .server
        .get("/proxy-rajaongkir/destination/domestic-destination")
        .await;

    response.assert_status(StatusCode::REQUEST_TIMEOUT);
    let json: Value = response.json();
    assert_eq!(json["success"], Value::Bool(false));
}

#[tokio::test]
async fn test_passthrough_oversized_body_is_413() {
    let app = TestApp::passthrough().await;
    app.upstream.expect_no_requests().await;

    let response = app
        .server
        .post("/proxy-rajaongkir/calculate/domestic-cost")
        .bytes(Bytes::from(vec![b'a'; 3 * 1024 * 1024]))
        .content_type("application/x-www-form-urlencoded")
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    let json: Value = response.json();
    assert_eq!(json, json!({"success": false, "message": "Request body too large"}));
}

#[tokio::test]
async fn test_validated_routes_absent_in_passthrough_mode() {
    let app = TestApp::passthrough().await;
    app.upstream.expect_no_requests().await;

    let response = app.server.get("/api/rajaongkir/destinations").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_passthrough_absent_in_validated_mode() {
    let app = TestApp::new().await;
    app.upstream.expect_no_requests().await;

    let response = app
        .server
        .get("/proxy-rajaongkir/destination/domestic-destination")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let json: Value = response.json();
    assert_eq!(json, json!({"success": false, "message": "Endpoint not found"}));
}
