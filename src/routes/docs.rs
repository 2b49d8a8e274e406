//! Documentation endpoints
//!
//! Serves Swagger UI and the raw OpenAPI document.
//! Protected by the X-Docs-Key header when a docs key is configured; returns
//! 404 when unauthorized to hide endpoint existence.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use utoipa::OpenApi;

use crate::docs::CompanionApiDoc;

/// Header carrying the docs key
pub const DOCS_KEY_HEADER: &str = "X-Docs-Key";

/// Key required to read the docs, if any
#[derive(Debug, Clone, Default)]
pub struct DocsKey(Option<Arc<str>>);

impl DocsKey {
    pub fn new(key: Option<&str>) -> Self {
        Self(key.map(Arc::from))
    }

    /// Whether a request carrying `provided` may see the docs
    pub fn allows(&self, provided: Option<&str>) -> bool {
        match (&self.0, provided) {
            (None, _) => true,
            (Some(expected), Some(provided)) => expected.as_ref() == provided,
            (Some(_), None) => false,
        }
    }
}

/// Middleware to protect docs endpoints with a shared key
///
/// Allows access when no key is configured (dev mode).
pub async fn docs_auth_middleware(
    State(docs_key): State<DocsKey>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(DOCS_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    if docs_key.allows(provided) {
        next.run(request).await
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(CompanionApiDoc::openapi())
}

async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

/// Create the docs router
///
/// Routes:
/// - GET /docs - Swagger UI
/// - GET /docs/openapi.json - Raw OpenAPI document
///
/// Generic over the state type so it can be merged into the main router.
pub fn create_docs_router<S>(docs_key: DocsKey) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/docs", get(swagger_ui))
        .route("/docs/", get(swagger_ui))
        .route("/docs/openapi.json", get(openapi_json))
        .layer(axum::middleware::from_fn_with_state(
            docs_key,
            docs_auth_middleware,
        ))
}

/// Swagger UI page, loading assets from the unpkg CDN
const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Career Companion API - Documentation</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        body { margin: 0; background: #fafafa; }
    </style>
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
