use crate::error::DatabaseErrorConverter;
use thiserror::Error;
use uuid::Uuid;

/// A single field that failed request or domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

/// Application-wide error type shared by the domain, service and API layers.
///
/// Every variant maps onto exactly one problem-details response in
/// `api::middleware::error_handler`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Entity lookup by identifier failed
    #[error("{entity} not found with identifier: {id}")]
    NotFound { entity: String, id: String },

    /// Student exists nowhere or belongs to a different school
    #[error("Student {student_id} not found in school {school_id}")]
    StudentNotInSchool { student_id: Uuid, school_id: Uuid },

    /// Enrollment attempted on a full school
    #[error("School {school_id} is at maximum capacity")]
    CapacityExceeded { school_id: Uuid },

    /// Another school already uses this name (case-insensitive)
    #[error("A school with this name already exists")]
    DuplicateName { name: String },

    /// Single-field validation failure raised by domain rules
    #[error("{reason}")]
    Validation { field: String, reason: String },

    /// Request payload validation failure covering one or more fields
    #[error("Validation failed")]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Malformed request (unparseable body, path or query)
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Optimistic lock failure: the row changed since it was read
    #[error("Version conflict on {entity} {id}")]
    VersionConflict { entity: String, id: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn school_not_found(id: Uuid) -> Self {
        AppError::NotFound {
            entity: "School".to_string(),
            id: id.to_string(),
        }
    }

    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn version_conflict(entity: &str, id: Uuid) -> Self {
        AppError::VersionConflict {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<diesel_async::pooled_connection::bb8::RunError> for AppError {
    fn from(error: diesel_async::pooled_connection::bb8::RunError) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::from(error),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<ValidationFieldError> = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, failures)| {
                failures.first().map(|failure| ValidationFieldError {
                    field: field.to_string(),
                    message: failure
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field)),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::ValidationErrors { errors: fields }
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<axum::extract::rejection::QueryRejection> for AppError {
    fn from(rejection: axum::extract::rejection::QueryRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<axum::extract::rejection::PathRejection> for AppError {
    fn from(rejection: axum::extract::rejection::PathRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
