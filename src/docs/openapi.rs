//! OpenAPI specification for the shipping proxy
//!
//! Aggregates the validated endpoints and their schemas into one document.
//! The pass-through forwarder has no fixed contract and is not described.

use utoipa::OpenApi;

use crate::{
    proxy::types::{FieldValue, ShippingCostRequest},
    response::ProxyResponse,
    routes::health::HealthResponse,
};

/// OpenAPI specification for the RajaOngkir proxy
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ongkir Proxy API",
        version = "1.0.0",
        description = "Shipping-cost proxy in front of RajaOngkir. The API key is injected server-side."
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::destinations::list_destinations,
        crate::routes::calculate::calculate_cost
    ),
    components(schemas(ProxyResponse, HealthResponse, ShippingCostRequest, FieldValue)),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Shipping", description = "Destination search and cost calculation")
    )
)]
pub struct ProxyApiDoc;
