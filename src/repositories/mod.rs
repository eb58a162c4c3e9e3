//! Repository layer for data access operations.
//!
//! Each aggregate has a trait seam with two backends: PostgreSQL through
//! diesel-async, and an in-memory store for development and tests.

mod memory;
mod school_repo;
mod student_repo;

pub use memory::InMemoryStore;
pub use school_repo::PgSchoolRepository;
pub use student_repo::PgStudentRepository;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::domain::{DomainEvent, Page, PageRequest, School, Student};
use crate::error::AppResult;

/// Change applied to a school while its row is locked.
pub type SchoolMutation = Box<dyn FnOnce(&mut School) -> AppResult<()> + Send>;

#[async_trait]
pub trait SchoolRepository: Send + Sync {
    /// Loads a school together with its current enrollment count.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<School>>;

    async fn exists(&self, id: Uuid) -> AppResult<bool>;

    /// Case-insensitive name lookup, optionally ignoring one school.
    async fn exists_by_name(&self, name: &str, excluding: Option<Uuid>) -> AppResult<bool>;

    async fn insert(&self, school: &School) -> AppResult<()>;

    /// Locks the school row, applies `mutation`, and writes the result back
    /// under an optimistic version check.
    async fn update_locked(&self, id: Uuid, mutation: SchoolMutation) -> AppResult<School>;

    /// Deletes the school and, by cascade, its students.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Schools whose name contains `query` (case-insensitive), ordered by name.
    async fn search(&self, query: &str, page: PageRequest) -> AppResult<Page<School>>;
}

/// A freshly persisted student and the events its enrollment raised.
#[derive(Debug)]
pub struct Enrollment {
    pub student: Student,
    pub events: Vec<DomainEvent>,
}

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Locks the school, enrolls through `School::enroll_student`, and
    /// inserts the student in the same transaction.
    async fn enroll(&self, school_id: Uuid, name: &str) -> AppResult<Enrollment>;

    async fn find_in_school(&self, school_id: Uuid, student_id: Uuid)
    -> AppResult<Option<Student>>;

    async fn exists_in_school(&self, school_id: Uuid, student_id: Uuid) -> AppResult<bool>;

    /// Writes `student` back if its version is still current.
    async fn update(&self, student: &Student) -> AppResult<Student>;

    async fn delete_in_school(&self, school_id: Uuid, student_id: Uuid) -> AppResult<bool>;

    async fn search(
        &self,
        school_id: Uuid,
        query: &str,
        page: PageRequest,
    ) -> AppResult<Page<Student>>;
}

/// Aggregates all repositories for convenient access.
#[derive(Clone)]
pub struct Repositories {
    pub schools: Arc<dyn SchoolRepository>,
    pub students: Arc<dyn StudentRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: AsyncDbPool) -> Self {
        Self {
            schools: Arc::new(PgSchoolRepository::new(pool.clone())),
            students: Arc::new(PgStudentRepository::new(pool)),
        }
    }

    /// Repositories sharing one process-local store.
    pub fn in_memory() -> Self {
        let store = InMemoryStore::default();
        Self {
            schools: Arc::new(store.clone()),
            students: Arc::new(store),
        }
    }
}

/// `ILIKE` pattern matching `query` anywhere, with wildcards in `query` escaped.
pub(crate) fn contains_pattern(query: &str) -> String {
    format!("%{}%", escape_like(query.trim()))
}

/// Escapes `\`, `%` and `_` so `value` matches literally under `LIKE`.
pub(crate) fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
