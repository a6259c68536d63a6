//! Documentation endpoints
//!
//! Serves a Swagger UI page and the raw OpenAPI spec. When a docs key is
//! configured the X-Docs-Key header must match; otherwise 404 is returned to
//! hide the endpoints.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use utoipa::OpenApi;

use crate::{docs::ProxyApiDoc, error::AppError};

/// Header carrying the docs key
pub const DOCS_KEY_HEADER: &str = "X-Docs-Key";

/// Expected docs key, `None` leaves the docs open
#[derive(Clone)]
struct DocsKey(Option<Arc<str>>);

/// Middleware to protect docs endpoints with a key
async fn docs_auth_middleware(
    State(DocsKey(expected)): State<DocsKey>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = expected else {
        return next.run(request).await;
    };

    let provided = request
        .headers()
        .get(DOCS_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    match provided {
        Some(provided) if provided == &*expected => next.run(request).await,
        _ => AppError::NotFound.into_response(),
    }
}

/// Handler for OpenAPI JSON endpoint
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ProxyApiDoc::openapi())
}

/// Handler for Swagger UI HTML
async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

/// Create the docs router
///
/// Routes:
/// - GET /docs - Swagger UI
/// - GET /docs/openapi.json - Raw OpenAPI spec
///
/// The router is generic over state type S so it can be merged into the
/// main router.
pub fn create_docs_router<S>(docs_key: Option<String>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let key = DocsKey(docs_key.map(Arc::from));

    Router::new()
        .route("/docs", get(swagger_ui))
        .route("/docs/openapi.json", get(openapi_json))
        .route_layer(axum::middleware::from_fn_with_state(
            key,
            docs_auth_middleware,
        ))
}

/// Swagger UI HTML template
///
/// Loads Swagger UI assets from the unpkg CDN.
const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Ongkir Proxy API - Documentation</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {
            window.ui = SwaggerUIBundle({
                url: "/docs/openapi.json",
                dom_id: '#swagger-ui',
                deepLinking: true
            });
        };
    </script>
</body>
</html>"#;
