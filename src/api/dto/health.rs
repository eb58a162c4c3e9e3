//! Health probe DTOs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Aggregate health of the service and its dependencies.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "status": "healthy",
    "version": "0.1.0",
    "timestamp": "2024-06-01T12:00:00Z",
    "checks": {
        "database": {
            "status": "healthy",
            "message": "Connected",
            "responseTimeMs": 3
        }
    }
}))]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[schema(example = "0.1.0")]
    pub version: String,
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: String,
    pub checks: BTreeMap<String, ComponentHealth>,
}

impl HealthResponse {
    /// The worst status among `checks`, healthy when there are none.
    pub fn from_checks(version: &str, checks: BTreeMap<String, ComponentHealth>) -> Self {
        let status = checks
            .values()
            .map(|c| c.status)
            .max()
            .unwrap_or(HealthStatus::Healthy);

        Self {
            status,
            version: version.to_string(),
            timestamp: jiff::Timestamp::now().to_string(),
            checks,
        }
    }
}

/// Ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentHealth {
    pub status: HealthStatus,
    #[schema(example = "Connected")]
    pub message: Option<String>,
    #[schema(example = 3)]
    pub response_time_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(status: HealthStatus) -> ComponentHealth {
        ComponentHealth {
            status,
            message: None,
            response_time_ms: Some(1),
        }
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Unhealthy).unwrap(),
            "\"unhealthy\""
        );
    }

    #[test]
    fn overall_status_is_the_worst_check() {
        let mut checks = BTreeMap::new();
        checks.insert("database".to_string(), component(HealthStatus::Healthy));
        checks.insert("disk".to_string(), component(HealthStatus::Degraded));

        let response = HealthResponse::from_checks("0.1.0", checks);
        assert_eq!(response.status, HealthStatus::Degraded);
        assert_eq!(response.version, "0.1.0");
    }

    #[test]
    fn no_checks_is_healthy() {
        let response = HealthResponse::from_checks("0.1.0", BTreeMap::new());
        assert_eq!(response.status, HealthStatus::Healthy);
    }
}
