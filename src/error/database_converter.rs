use crate::error::{AppError, ConstraintParser};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

/// Unique index on `lower(schools.name)`.
pub const SCHOOL_NAME_UNIQUE: &str = "uk_school_name_ci";
/// Foreign key from `students.school_id` to `schools.id`.
pub const STUDENT_SCHOOL_FK: &str = "fk_student_school";
/// Check constraint keeping `schools.capacity` within bounds.
pub const SCHOOL_CAPACITY_CHECK: &str = "ck_school_capacity";

/// Converts Diesel errors into domain-level `AppError` variants using the
/// constraint names declared in the migrations.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let constraint = info
            .constraint_name()
            .map(str::to_string)
            .or_else(|| ConstraintParser::constraint_name(info.message()));
        let key_value = info.details().and_then(ConstraintParser::key_value);

        match (kind, constraint.as_deref()) {
            (DatabaseErrorKind::UniqueViolation, Some(SCHOOL_NAME_UNIQUE)) => {
                AppError::DuplicateName {
                    name: key_value.map(|(_, value)| value).unwrap_or_default(),
                }
            }
            (DatabaseErrorKind::ForeignKeyViolation, Some(STUDENT_SCHOOL_FK)) => {
                let id = key_value
                    .map(|(_, value)| value)
                    .unwrap_or_else(|| Uuid::nil().to_string());
                AppError::NotFound {
                    entity: "School".to_string(),
                    id,
                }
            }
            (DatabaseErrorKind::CheckViolation, Some(SCHOOL_CAPACITY_CHECK)) => {
                AppError::validation("capacity", "Capacity must be between 50 and 2000")
            }
            (DatabaseErrorKind::SerializationFailure, _) => AppError::VersionConflict {
                entity: ConstraintParser::table_name(info.message())
                    .unwrap_or_else(|| "row".to_string()),
                id: "unknown".to_string(),
            },
            (kind, _) => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::anyhow!("{:?}: {}", kind, info.message()),
            },
        }
    }
}
