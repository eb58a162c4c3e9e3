mod app_error;
mod constraint_parser;
mod database_converter;

pub use app_error::{AppError, AppResult, ValidationFieldError};
pub use constraint_parser::ConstraintParser;
pub use database_converter::{
    DatabaseErrorConverter, SCHOOL_CAPACITY_CHECK, SCHOOL_NAME_UNIQUE, STUDENT_SCHOOL_FK,
};
