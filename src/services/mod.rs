//! Service layer for business logic operations.
//!
//! Services encapsulate the school and enrollment use cases and coordinate
//! between repositories, the domain model and the event publisher.

mod school_service;
mod student_service;

pub use school_service::{SchoolChanges, SchoolService};
pub use student_service::StudentService;

use std::sync::Arc;

use crate::domain::DomainEventPublisher;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since every repository sits behind an `Arc`.
#[derive(Clone)]
pub struct Services {
    pub schools: SchoolService,
    pub students: StudentService,
}

impl Services {
    pub fn new(repos: Repositories, publisher: Arc<dyn DomainEventPublisher>) -> Self {
        Self {
            schools: SchoolService::new(repos.schools.clone()),
            students: StudentService::new(repos.schools, repos.students, publisher),
        }
    }
}
