//! Router configuration for the API.
//!
//! Routes are collected through `OpenApiRouter` so the OpenAPI document is
//! built from the same handlers that serve requests.

use std::time::Duration;

use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{
    REQUEST_ID_HEADER, global_error_handler, logging_middleware, request_id_middleware,
    route_not_found,
};
use crate::config::ServerConfig;
use crate::state::AppState;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Layers run outermost first:
/// 1. CORS (when origins are configured)
/// 2. Request ID - generates/propagates request IDs
/// 3. Logging - logs requests inside a span carrying the request ID
/// 4. Compression
/// 5. Error handler - completes problem details
/// 6. Timeout
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let (api_routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/schools", handlers::schools::school_routes())
        .nest(
            "/api/schools/{school_id}/students",
            handlers::students::student_routes(),
        )
        .merge(handlers::health::health_routes())
        .with_state(state)
        .split_for_parts();

    let router = Router::new()
        .merge(api_routes)
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, api_doc))
        .fallback(route_not_found)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout),
        ))
        .layer(middleware::from_fn(global_error_handler))
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware));

    match cors_layer(&server.cors_origins) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

/// CORS for the configured origins; `None` when no origin is configured.
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([
                header::CONTENT_TYPE,
                header::HeaderName::from_static(REQUEST_ID_HEADER),
            ])
            .expose_headers([header::HeaderName::from_static(REQUEST_ID_HEADER)]),
    )
}
