//! School request and response bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::{Capacity, School};
use crate::services::SchoolChanges;
use crate::utils::validate::{max_name_length, not_blank, rule_violation};

fn school_capacity(capacity: i32) -> Result<(), ValidationError> {
    if capacity < Capacity::MIN {
        return Err(rule_violation("range", "School capacity must be at least 50"));
    }
    if capacity > Capacity::MAX {
        return Err(rule_violation("range", "School capacity cannot exceed 2000"));
    }
    Ok(())
}

/// Full school payload used for creation and full replacement.
///
/// Missing fields deserialize to empty values so they are reported as
/// validation errors rather than as malformed JSON.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({"name": "Springfield Elementary", "capacity": 500}))]
pub struct SchoolRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "School name is required"),
        custom(function = "max_name_length", message = "School name must be at most 100 characters")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(custom(function = "school_capacity"))]
    #[schema(minimum = 50, maximum = 2000)]
    pub capacity: i32,
}

impl From<SchoolRequest> for SchoolChanges {
    fn from(request: SchoolRequest) -> Self {
        SchoolChanges {
            name: Some(request.name),
            capacity: Some(request.capacity),
        }
    }
}

/// Partial school update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({"capacity": 750}))]
pub struct SchoolPatchRequest {
    #[validate(
        custom(function = "not_blank", message = "School name is required"),
        custom(function = "max_name_length", message = "School name must be at most 100 characters")
    )]
    pub name: Option<String>,

    #[validate(custom(function = "school_capacity"))]
    #[schema(minimum = 50, maximum = 2000)]
    pub capacity: Option<i32>,
}

impl From<SchoolPatchRequest> for SchoolChanges {
    fn from(request: SchoolPatchRequest) -> Self {
        SchoolChanges {
            name: request.name,
            capacity: request.capacity,
        }
    }
}

/// A single school with its enrollment figures.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchoolDetail {
    pub id: Uuid,
    #[schema(example = "Springfield Elementary")]
    pub name: String,
    #[schema(example = 500)]
    pub capacity: i32,
    #[schema(example = 120)]
    pub enrolled_students: i64,
    #[schema(example = 380)]
    pub available_spots: i64,
    pub version: i64,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: jiff::Timestamp,
}

impl From<School> for SchoolDetail {
    fn from(school: School) -> Self {
        Self {
            id: school.id(),
            name: school.name().to_string(),
            capacity: school.capacity().value(),
            enrolled_students: school.enrolled_count(),
            available_spots: school.available_spots(),
            version: school.version(),
            created_at: school.created_at(),
            updated_at: school.updated_at(),
        }
    }
}

/// Search result row for schools.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchoolSummary {
    pub id: Uuid,
    pub name: String,
    pub capacity: i32,
    pub enrolled_students: i64,
}

impl From<School> for SchoolSummary {
    fn from(school: School) -> Self {
        Self {
            id: school.id(),
            name: school.name().to_string(),
            capacity: school.capacity().value(),
            enrolled_students: school.enrolled_count(),
        }
    }
}
