use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::Student;
use crate::utils::validate::{max_name_length, not_blank};

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({"name": "Lisa Simpson"}))]
pub struct StudentRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Student name is required"),
        custom(function = "max_name_length", message = "Student name must be at most 100 characters")
    )]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: Uuid,
    #[schema(example = "Lisa Simpson")]
    pub name: String,
    pub school_id: Uuid,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            id: student.id(),
            name: student.name().to_string(),
            school_id: student.school_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_or_missing_name_is_required() {
        for body in [r#"{}"#, r#"{"name":"  "}"#] {
            let request: StudentRequest = serde_json::from_str(body).unwrap();
            let errors = request.validate().unwrap_err();
            let message = errors.field_errors()["name"][0].message.clone().unwrap();
            assert_eq!(message, "Student name is required");
        }
    }
}
