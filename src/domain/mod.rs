//! Domain model: schools, students, and the rules that bind them.

mod capacity;
pub mod events;
mod page;
mod school;
mod student;

pub use capacity::Capacity;
pub use events::{DomainEvent, DomainEventPublisher, TracingEventPublisher};
pub use page::{Page, PageRequest};
pub use school::School;
pub use student::Student;

use crate::error::{AppError, AppResult};

/// Longest accepted school or student name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Trims `raw` and checks it is non-blank and short enough.
pub(crate) fn normalize_name(field: &str, entity: &str, raw: &str) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::validation(
            field,
            format!("{} name is required", entity),
        ));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::validation(
            field,
            format!(
                "{} name must be at most {} characters",
                entity, MAX_NAME_LENGTH
            ),
        ));
    }
    Ok(name.to_string())
}
