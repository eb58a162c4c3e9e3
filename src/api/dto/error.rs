//! RFC 7807 problem details.

use std::collections::BTreeMap;

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const PROBLEM_JSON: &str = "application/problem+json";

/// Error body returned by every failing endpoint.
///
/// A copy travels in the response extensions so the error middleware can
/// fill in `instance` and `requestId` without re-parsing the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "type": "about:blank",
    "title": "Not Found",
    "status": 404,
    "detail": "School not found with identifier: 3fa85f64-5717-4562-b3fc-2c963f66afa6",
    "instance": "/api/schools/3fa85f64-5717-4562-b3fc-2c963f66afa6",
    "timestamp": "2024-06-01T12:00:00Z",
    "requestId": "0b6f4c1e-9a8d-4f0e-8a57-2d4b1c7e9f10"
}))]
pub struct ProblemDetail {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Field name to message, present for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

impl ProblemDetail {
    pub fn new(status: StatusCode, title: &str, detail: impl Into<String>) -> Self {
        Self {
            problem_type: "about:blank".to_string(),
            title: title.to_string(),
            status: status.as_u16(),
            detail: detail.into(),
            instance: None,
            timestamp: jiff::Timestamp::now().to_string(),
            request_id: None,
            errors: None,
        }
    }

    /// Problem for a status that has no richer error behind it.
    pub fn for_status(status: StatusCode, detail: Option<String>) -> Self {
        let title = status.canonical_reason().unwrap_or("Error");
        let detail = detail
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| title.to_string());
        Self::new(status, title, detail)
    }

    pub fn with_errors(mut self, errors: BTreeMap<String, String>) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ProblemDetail {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match serde_json::to_vec(&self) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize problem detail");
                return status.into_response();
            }
        };

        let mut response = (status, body).into_response();
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON));
        response.extensions_mut().insert(self);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_type_and_skips_empty_fields() {
        let problem = ProblemDetail::new(StatusCode::CONFLICT, "Duplicate Name", "taken");
        let json = serde_json::to_value(&problem).unwrap();

        assert_eq!(json["type"], "about:blank");
        assert_eq!(json["status"], 409);
        assert!(json.get("instance").is_none());
        assert!(json.get("requestId").is_none());
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn for_status_falls_back_to_reason() {
        let problem = ProblemDetail::for_status(StatusCode::METHOD_NOT_ALLOWED, None);
        assert_eq!(problem.title, "Method Not Allowed");
        assert_eq!(problem.detail, "Method Not Allowed");

        let problem = ProblemDetail::for_status(StatusCode::BAD_REQUEST, Some("bad uuid".into()));
        assert_eq!(problem.detail, "bad uuid");
    }

    #[test]
    fn response_carries_problem_content_type_and_extension() {
        let problem = ProblemDetail::new(StatusCode::NOT_FOUND, "Not Found", "missing")
            .with_request_id("req-1");
        let response = problem.clone().into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::CONTENT_TYPE], PROBLEM_JSON);
        assert_eq!(response.extensions().get::<ProblemDetail>(), Some(&problem));
    }
}
