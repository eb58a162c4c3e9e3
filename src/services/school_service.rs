//! School use cases.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Page, PageRequest, School};
use crate::error::{AppError, AppResult};
use crate::repositories::SchoolRepository;

/// Fields to change on an existing school. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchoolChanges {
    pub name: Option<String>,
    pub capacity: Option<i32>,
}

#[derive(Clone)]
pub struct SchoolService {
    repo: Arc<dyn SchoolRepository>,
}

impl SchoolService {
    pub fn new(repo: Arc<dyn SchoolRepository>) -> Self {
        Self { repo }
    }

    /// Creates a school after checking the name is free.
    ///
    /// The unique index on `lower(name)` still guards against a concurrent
    /// insert slipping past the check; that surfaces as `DuplicateName` too.
    pub async fn create_school(&self, name: &str, capacity: i32) -> AppResult<School> {
        let school = School::create(name, capacity)?;
        if self.repo.exists_by_name(school.name(), None).await? {
            return Err(AppError::DuplicateName {
                name: school.name().to_string(),
            });
        }

        self.repo.insert(&school).await?;
        tracing::info!(school_id = %school.id(), name = %school.name(), "School created");
        Ok(school)
    }

    pub async fn get_school(&self, id: Uuid) -> AppResult<School> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::school_not_found(id))
    }

    /// Applies `changes` while the school row is locked.
    ///
    /// A rename is only checked for duplicates when it differs from the
    /// current name ignoring case, so re-casing a name is always allowed.
    pub async fn update_school(&self, id: Uuid, changes: SchoolChanges) -> AppResult<School> {
        let current = self.get_school(id).await?;

        if let Some(name) = changes.name.as_deref() {
            if !current.has_name(name) && self.repo.exists_by_name(name, Some(id)).await? {
                return Err(AppError::DuplicateName {
                    name: name.trim().to_string(),
                });
            }
        }

        let updated = self
            .repo
            .update_locked(
                id,
                Box::new(move |school: &mut School| {
                    if let Some(name) = changes.name.as_deref() {
                        school.change_name(name)?;
                    }
                    if let Some(capacity) = changes.capacity {
                        school.resize_capacity(capacity)?;
                    }
                    Ok(())
                }),
            )
            .await?;

        tracing::info!(school_id = %id, version = updated.version(), "School updated");
        Ok(updated)
    }

    pub async fn delete_school(&self, id: Uuid) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::school_not_found(id));
        }
        tracing::info!(school_id = %id, "School deleted");
        Ok(())
    }

    pub async fn search_schools(&self, query: &str, page: PageRequest) -> AppResult<Page<School>> {
        self.repo.search(query, page).await
    }
}
