//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by resource:
//! - `school` - school request/response bodies
//! - `student` - student request/response bodies
//! - `pagination` - search parameters and paged responses
//! - `error` - RFC 7807 problem details
//! - `health` - health probe responses

mod error;
mod health;
mod pagination;
mod school;
mod student;

pub use error::{PROBLEM_JSON, ProblemDetail};
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use pagination::{PageParams, PagedResponse};
pub use school::{SchoolDetail, SchoolPatchRequest, SchoolRequest, SchoolSummary};
pub use student::{StudentRequest, StudentResponse};
