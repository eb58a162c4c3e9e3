//! Process-local store implementing both repository traits.
//!
//! Mirrors the PostgreSQL backend: case-insensitive unique names, cascade
//! delete, versioned updates and name-ordered search. A single mutex plays
//! the part of the row lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use jiff::Timestamp;
use uuid::Uuid;

use crate::domain::{Capacity, Page, PageRequest, School, Student};
use crate::error::{AppError, AppResult};
use crate::repositories::{
    Enrollment, SchoolMutation, SchoolRepository, StudentRepository,
};

#[derive(Debug, Clone)]
struct StoredSchool {
    id: Uuid,
    name: String,
    capacity: Capacity,
    version: i64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

#[derive(Debug, Default)]
struct State {
    schools: HashMap<Uuid, StoredSchool>,
    students: HashMap<Uuid, Student>,
}

impl State {
    fn enrolled(&self, school_id: Uuid) -> i64 {
        let count = self
            .students
            .values()
            .filter(|s| s.belongs_to(school_id))
            .count();
        i64::try_from(count).unwrap_or(i64::MAX)
    }

    fn school(&self, id: Uuid) -> Option<School> {
        self.schools.get(&id).map(|stored| {
            School::rehydrate(
                stored.id,
                stored.name.clone(),
                stored.capacity,
                self.enrolled(id),
                stored.version,
                stored.created_at,
                stored.updated_at,
            )
        })
    }

    fn name_taken(&self, name: &str, excluding: Option<Uuid>) -> bool {
        let wanted = name.trim().to_lowercase();
        self.schools
            .values()
            .any(|s| Some(s.id) != excluding && s.name.to_lowercase() == wanted)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    fn lock(&self) -> AppResult<MutexGuard<'_, State>> {
        self.state.lock().map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("In-memory store lock poisoned: {}", e),
        })
    }
}

fn paginate<T>(mut items: Vec<T>, page: PageRequest) -> Page<T> {
    let total = items.len();
    let start = usize::try_from(page.offset()).unwrap_or(usize::MAX).min(total);
    let end = start
        .saturating_add(usize::try_from(page.limit()).unwrap_or(usize::MAX))
        .min(total);
    let slice: Vec<T> = items.drain(start..end).collect();
    Page::new(slice, page, total as u64)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

#[async_trait]
impl SchoolRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<School>> {
        Ok(self.lock()?.school(id))
    }

    async fn exists(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.lock()?.schools.contains_key(&id))
    }

    async fn exists_by_name(&self, name: &str, excluding: Option<Uuid>) -> AppResult<bool> {
        Ok(self.lock()?.name_taken(name, excluding))
    }

    async fn insert(&self, school: &School) -> AppResult<()> {
        let mut state = self.lock()?;
        if state.name_taken(school.name(), None) {
            return Err(AppError::DuplicateName {
                name: school.name().to_string(),
            });
        }
        state.schools.insert(
            school.id(),
            StoredSchool {
                id: school.id(),
                name: school.name().to_string(),
                capacity: school.capacity(),
                version: school.version(),
                created_at: school.created_at(),
                updated_at: school.updated_at(),
            },
        );
        Ok(())
    }

    async fn update_locked(&self, id: Uuid, mutation: SchoolMutation) -> AppResult<School> {
        let mut state = self.lock()?;
        let mut school = state.school(id).ok_or_else(|| AppError::school_not_found(id))?;
        mutation(&mut school)?;

        if state.name_taken(school.name(), Some(id)) {
            return Err(AppError::DuplicateName {
                name: school.name().to_string(),
            });
        }

        let next_version = school.version() + 1;
        let updated_at = school.updated_at();
        let stored = state
            .schools
            .get_mut(&id)
            .ok_or_else(|| AppError::school_not_found(id))?;
        if stored.version != school.version() {
            return Err(AppError::version_conflict("School", id));
        }
        stored.name = school.name().to_string();
        stored.capacity = school.capacity();
        stored.version = next_version;
        stored.updated_at = updated_at;

        school.committed(next_version, updated_at);
        Ok(school)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.lock()?;
        if state.schools.remove(&id).is_none() {
            return Ok(false);
        }
        state.students.retain(|_, s| !s.belongs_to(id));
        Ok(true)
    }

    async fn search(&self, query: &str, page: PageRequest) -> AppResult<Page<School>> {
        let state = self.lock()?;
        let mut matches: Vec<&StoredSchool> = state
            .schools
            .values()
            .filter(|s| contains_ignore_case(&s.name, query))
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let schools = matches
            .into_iter()
            .filter_map(|s| state.school(s.id))
            .collect();
        Ok(paginate(schools, page))
    }
}

#[async_trait]
impl StudentRepository for InMemoryStore {
    async fn enroll(&self, school_id: Uuid, name: &str) -> AppResult<Enrollment> {
        let mut state = self.lock()?;
        let mut school = state
            .school(school_id)
            .ok_or_else(|| AppError::school_not_found(school_id))?;
        let student = school.enroll_student(name)?;
        state.students.insert(student.id(), student.clone());
        Ok(Enrollment {
            student,
            events: school.take_events(),
        })
    }

    async fn find_in_school(
        &self,
        school_id: Uuid,
        student_id: Uuid,
    ) -> AppResult<Option<Student>> {
        Ok(self
            .lock()?
            .students
            .get(&student_id)
            .filter(|s| s.belongs_to(school_id))
            .cloned())
    }

    async fn exists_in_school(&self, school_id: Uuid, student_id: Uuid) -> AppResult<bool> {
        Ok(self
            .lock()?
            .students
            .get(&student_id)
            .is_some_and(|s| s.belongs_to(school_id)))
    }

    async fn update(&self, student: &Student) -> AppResult<Student> {
        let mut state = self.lock()?;
        let stored = state
            .students
            .get_mut(&student.id())
            .filter(|s| s.belongs_to(student.school_id()) && s.version() == student.version())
            .ok_or_else(|| AppError::version_conflict("Student", student.id()))?;

        let mut updated = student.clone();
        updated.committed(student.version() + 1, student.updated_at());
        *stored = updated.clone();
        Ok(updated)
    }

    async fn delete_in_school(&self, school_id: Uuid, student_id: Uuid) -> AppResult<bool> {
        let mut state = self.lock()?;
        let owned = state
            .students
            .get(&student_id)
            .is_some_and(|s| s.belongs_to(school_id));
        if owned {
            state.students.remove(&student_id);
        }
        Ok(owned)
    }

    async fn search(
        &self,
        school_id: Uuid,
        query: &str,
        page: PageRequest,
    ) -> AppResult<Page<Student>> {
        let state = self.lock()?;
        let mut matches: Vec<Student> = state
            .students
            .values()
            .filter(|s| s.belongs_to(school_id) && contains_ignore_case(s.name(), query))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
        Ok(paginate(matches, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded(capacity: i32) -> (InMemoryStore, School) {
        let store = InMemoryStore::default();
        let school = School::create("Springfield Elementary", capacity).unwrap();
        SchoolRepository::insert(&store, &school).await.unwrap();
        (store, school)
    }

    #[tokio::test]
    async fn insert_rejects_case_insensitive_duplicates() {
        let (store, _) = seeded(100).await;
        let twin = School::create("SPRINGFIELD elementary", 100).unwrap();

        assert!(matches!(
            SchoolRepository::insert(&store, &twin).await,
            Err(AppError::DuplicateName { .. })
        ));
        assert!(store.exists_by_name("springfield elementary", None).await.unwrap());
    }

    #[tokio::test]
    async fn enroll_counts_and_stops_at_capacity() {
        let (store, school) = seeded(50).await;
        for i in 0..50 {
            let enrollment = store.enroll(school.id(), &format!("Student {:02}", i)).await.unwrap();
            assert_eq!(enrollment.events.len(), 1);
        }

        assert!(matches!(
            store.enroll(school.id(), "Late").await,
            Err(AppError::CapacityExceeded { .. })
        ));
        let reloaded = store.find_by_id(school.id()).await.unwrap().unwrap();
        assert_eq!(reloaded.enrolled_count(), 50);
    }

    #[tokio::test]
    async fn enroll_into_missing_school_is_not_found() {
        let store = InMemoryStore::default();
        assert!(matches!(
            store.enroll(Uuid::new_v4(), "Nobody").await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn delete_cascades_to_students() {
        let (store, school) = seeded(50).await;
        let student = store.enroll(school.id(), "Bart").await.unwrap().student;

        assert!(SchoolRepository::delete(&store, school.id()).await.unwrap());
        assert!(!store.exists_in_school(school.id(), student.id()).await.unwrap());
        assert!(!SchoolRepository::delete(&store, school.id()).await.unwrap());
    }

    #[tokio::test]
    async fn stale_student_version_conflicts() {
        let (store, school) = seeded(50).await;
        let student = store.enroll(school.id(), "Lisa").await.unwrap().student;

        let mut first = student.clone();
        first.rename("Lisa S").unwrap();
        let saved = store.update(&first).await.unwrap();
        assert_eq!(saved.version(), 1);

        let mut stale = student;
        stale.rename("Lisa Marie").unwrap();
        assert!(matches!(
            store.update(&stale).await,
            Err(AppError::VersionConflict { .. })
        ));
    }

    #[tokio::test]
    async fn update_locked_bumps_version() {
        let (store, school) = seeded(100).await;
        let updated = store
            .update_locked(school.id(), Box::new(|s| s.resize_capacity(150)))
            .await
            .unwrap();

        assert_eq!(updated.capacity().value(), 150);
        assert_eq!(updated.version(), 1);
        assert_eq!(store.find_by_id(school.id()).await.unwrap().unwrap().version(), 1);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_paged() {
        let store = InMemoryStore::default();
        for name in ["Alpha High", "beta high", "Gamma Academy", "Delta HIGH"] {
            SchoolRepository::insert(&store, &School::create(name, 100).unwrap())
                .await
                .unwrap();
        }

        let page = SchoolRepository::search(&store, "high", PageRequest::new(0, 2))
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].name(), "Alpha High");
        assert!(page.has_next());

        let second = SchoolRepository::search(&store, "high", PageRequest::new(1, 2))
            .await
            .unwrap();
        assert_eq!(second.items.len(), 1);
        assert!(!second.has_next());
    }
}
