//! HTTP routes for the shipping proxy
//!
//! This module defines all HTTP endpoints exposed by the proxy.

pub mod calculate;
pub mod destinations;
pub mod docs;
pub mod fallback;
pub mod health;
pub mod metrics;
pub mod passthrough;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{any, get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::{
    config::{Config, ProxyMode},
    middleware::api_key::require_api_key,
    routes::passthrough::PASSTHROUGH_PREFIX,
    AppState,
};

/// Create the main application router
///
/// Mounts either the validated API or the pass-through forwarder, depending
/// on [`ProxyMode`].
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = build_cors(&state.config);

    // Proxy routes need an API key; checked before any validation.
    // A wrong method on a known path answers like an unknown path.
    let proxy_routes = match state.config.proxy_mode {
        ProxyMode::Validated => Router::new()
            .route(
                "/api/rajaongkir/destinations",
                get(destinations::list_destinations).fallback(fallback::not_found),
            )
            .route(
                "/api/rajaongkir/calculate",
                post(calculate::calculate_cost).fallback(fallback::not_found),
            ),
        ProxyMode::PassThrough => Router::new()
            .route(PASSTHROUGH_PREFIX, any(passthrough::passthrough_handler))
            .route(
                &format!("{}/*path", PASSTHROUGH_PREFIX),
                any(passthrough::passthrough_handler),
            ),
    }
    .route_layer(middleware::from_fn_with_state(
        state.clone(),
        require_api_key,
    ));

    // Public routes (health checks, metrics) - no API key required
    let public_routes = Router::new()
        .route(
            "/health",
            get(health::health_check).fallback(fallback::not_found),
        )
        .route(
            "/metrics",
            get(metrics::prometheus_metrics).fallback(fallback::not_found),
        );

    Router::new()
        .merge(public_routes)
        .merge(proxy_routes)
        .merge(docs::create_docs_router(state.config.docs_api_key.clone()))
        .fallback(fallback::not_found)
        // Global middleware (applied to all routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(CatchPanicLayer::custom(fallback::handle_panic))
        .with_state(state)
}

/// CORS policy: any origin unless an explicit list is configured
fn build_cors(config: &Config) -> CorsLayer {
    if config.cors_allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
