//! Health check endpoint handlers.
//!
//! Health checks go straight to the connection pool rather than through the
//! service layer. With the in-memory backend there is no pool and the store
//! always reports healthy.

use std::collections::BTreeMap;
use std::time::Instant;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Aggregate health check
/// - `GET /health/ready` - Readiness probe
/// - `GET /health/live` - Liveness probe
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(readiness_check))
        .routes(routes!(liveness_check))
}

/// Aggregate health including database connectivity.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let mut checks = BTreeMap::new();
    checks.insert("database".to_string(), check_database(&state).await);

    let response = HealthResponse::from_checks(crate::pkg_version(), checks);
    let status = match response.status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(response))
}

/// Whether the service can take traffic.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready"),
        (status = 503, description = "Service is not ready")
    ),
    tag = HEALTH_TAG
)]
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    match check_database(&state).await.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded | HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Liveness probe; never touches dependencies.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = HEALTH_TAG
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

async fn check_database(state: &AppState) -> ComponentHealth {
    let start = Instant::now();
    let elapsed = |start: Instant| Some(u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX));

    let Some(pool) = state.db_pool.as_ref() else {
        return ComponentHealth {
            status: HealthStatus::Healthy,
            message: Some("In-memory store".to_string()),
            response_time_ms: elapsed(start),
        };
    };

    match pool.get().await {
        Ok(mut conn) => {
            use diesel_async::RunQueryDsl;

            match diesel::sql_query("SELECT 1").execute(&mut conn).await {
                Ok(_) => ComponentHealth {
                    status: HealthStatus::Healthy,
                    message: Some("Connected".to_string()),
                    response_time_ms: elapsed(start),
                },
                Err(e) => {
                    tracing::warn!(error = %e, "Database health query failed");
                    ComponentHealth {
                        status: HealthStatus::Unhealthy,
                        message: Some(format!("Query failed: {}", e)),
                        response_time_ms: elapsed(start),
                    }
                }
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Database health check could not get a connection");
            ComponentHealth {
                status: HealthStatus::Unhealthy,
                message: Some(format!("Connection failed: {}", e)),
                response_time_ms: elapsed(start),
            }
        }
    }
}
