//! Error handler for converting AppError to HTTP responses.
//!
//! Every error leaves the API as an RFC 7807 problem detail. Handlers
//! produce one through `IntoResponse for AppError`; `global_error_handler`
//! stamps it with the request path and request ID, and rewrites any other
//! error response (axum rejections, 405, timeouts) into the same shape.

use std::collections::BTreeMap;

use axum::{
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::RequestId;
use crate::api::dto::{PROBLEM_JSON, ProblemDetail};
use crate::error::AppError;

/// Largest error body read back when converting a non-problem response.
const MAX_ERROR_BODY: usize = 16 * 1024;

impl From<&AppError> for ProblemDetail {
    fn from(error: &AppError) -> Self {
        match error {
            AppError::NotFound { .. } | AppError::StudentNotInSchool { .. } => {
                ProblemDetail::new(StatusCode::NOT_FOUND, "Not Found", error.to_string())
            }
            AppError::CapacityExceeded { .. } => {
                ProblemDetail::new(StatusCode::CONFLICT, "Capacity Exceeded", error.to_string())
            }
            AppError::DuplicateName { .. } => {
                ProblemDetail::new(StatusCode::CONFLICT, "Duplicate Name", error.to_string())
            }
            AppError::Validation { field, reason } => {
                ProblemDetail::new(StatusCode::BAD_REQUEST, "Bad Request", reason.clone())
                    .with_errors(BTreeMap::from([(field.clone(), reason.clone())]))
            }
            AppError::ValidationErrors { errors } => {
                let errors = errors
                    .iter()
                    .map(|e| (e.field.clone(), e.message.clone()))
                    .collect();
                ProblemDetail::new(StatusCode::BAD_REQUEST, "Bad Request", "Validation failed")
                    .with_errors(errors)
            }
            AppError::BadRequest { message } => {
                ProblemDetail::new(StatusCode::BAD_REQUEST, "Bad Request", message.clone())
            }
            AppError::VersionConflict { .. } => ProblemDetail::new(
                StatusCode::CONFLICT,
                "Optimistic Locking Failure",
                "Version conflict",
            ),
            AppError::ConnectionPool { .. } => ProblemDetail::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "Service Unavailable",
                "Database connection unavailable",
            ),
            AppError::Database { .. } | AppError::Internal { .. } => ProblemDetail::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                "An unexpected error occurred",
            ),
        }
    }
}

impl IntoResponse for AppError {
    /// Logs the error and renders it as a problem detail.
    ///
    /// Server-side failures are logged with their source chain; the body
    /// only ever carries the sanitized detail.
    fn into_response(self) -> Response {
        let problem = ProblemDetail::from(&self);

        if problem.status_code().is_server_error() {
            tracing::error!(error = ?self, status = problem.status, "Request failed");
        } else {
            tracing::debug!(error = %self, status = problem.status, "Request rejected");
        }

        problem.into_response()
    }
}

/// Fallback for unmatched routes.
pub async fn route_not_found(request: Request) -> ProblemDetail {
    ProblemDetail::new(
        StatusCode::NOT_FOUND,
        "Not Found",
        format!("No route for {} {}", request.method(), request.uri().path()),
    )
}

/// Completes problem details and converts stray error responses.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let instance = request.uri().path().to_string();
    let request_id = request.extensions().get::<RequestId>().map(|r| r.0.clone());

    let response = next.run(request).await;
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let problem = match response.extensions().get::<ProblemDetail>() {
        Some(problem) => problem.clone(),
        None => {
            let is_problem = response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.starts_with(PROBLEM_JSON));
            if is_problem {
                return response;
            }

            let (_parts, body) = response.into_parts();
            let detail = axum::body::to_bytes(body, MAX_ERROR_BODY)
                .await
                .ok()
                .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string());
            ProblemDetail::for_status(status, detail)
        }
    };

    let mut problem = problem.with_instance(instance);
    if let Some(request_id) = request_id {
        problem = problem.with_request_id(request_id);
    }
    problem.into_response()
}
