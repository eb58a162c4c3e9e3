//! School aggregate root.

use crate::domain::{Capacity, DomainEvent, Student, normalize_name};
use crate::error::{AppError, AppResult};
use jiff::Timestamp;
use uuid::Uuid;

/// A school with its capacity and the number of students currently enrolled.
///
/// Students are not loaded with the aggregate. `enrolled` is the count
/// read under the same lock as the school row, which is all the invariants
/// below need.
#[derive(Debug, Clone, PartialEq)]
pub struct School {
    id: Uuid,
    name: String,
    capacity: Capacity,
    enrolled: i64,
    version: i64,
    created_at: Timestamp,
    updated_at: Timestamp,
    events: Vec<DomainEvent>,
}

impl School {
    /// Creates a new, empty school with a fresh identifier.
    pub fn create(name: &str, capacity: i32) -> AppResult<Self> {
        let name = normalize_name("name", "School", name)?;
        let capacity = Capacity::new(capacity)?;
        let now = Timestamp::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            capacity,
            enrolled: 0,
            version: 0,
            created_at: now,
            updated_at: now,
            events: Vec::new(),
        })
    }

    /// Rebuilds a school from persisted state.
    pub(crate) fn rehydrate(
        id: Uuid,
        name: String,
        capacity: Capacity,
        enrolled: i64,
        version: i64,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            capacity,
            enrolled,
            version,
            created_at,
            updated_at,
            events: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn enrolled_count(&self) -> i64 {
        self.enrolled
    }

    pub fn available_spots(&self) -> i64 {
        self.capacity.available_spots(self.enrolled)
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Whether `other` names this school, ignoring case and surrounding whitespace.
    pub fn has_name(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.trim().to_lowercase()
    }

    /// Enrolls a new student and records a `StudentEnrolled` event.
    pub fn enroll_student(&mut self, name: &str) -> AppResult<Student> {
        if !self.capacity.can_enroll(self.enrolled) {
            return Err(AppError::CapacityExceeded { school_id: self.id });
        }
        let student = Student::create(name, self.id)?;
        self.enrolled += 1;
        self.events
            .push(DomainEvent::student_enrolled(student.id(), self.id));
        Ok(student)
    }

    pub fn change_name(&mut self, name: &str) -> AppResult<()> {
        self.name = normalize_name("name", "School", name)?;
        self.touch();
        Ok(())
    }

    /// Changes capacity; the new value may not drop below current enrollment.
    pub fn resize_capacity(&mut self, capacity: i32) -> AppResult<()> {
        let capacity = Capacity::new(capacity)?;
        if i64::from(capacity.value()) < self.enrolled {
            return Err(AppError::validation(
                "capacity",
                format!(
                    "New capacity ({}) cannot be less than current enrollment ({})",
                    capacity.value(),
                    self.enrolled
                ),
            ));
        }
        self.capacity = capacity;
        self.touch();
        Ok(())
    }

    /// Marks the aggregate as persisted under a new version.
    pub(crate) fn committed(&mut self, version: i64, updated_at: Timestamp) {
        self.version = version;
        self.updated_at = updated_at;
    }

    /// Drains the events raised since the last call.
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
