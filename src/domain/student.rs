use crate::domain::normalize_name;
use crate::error::AppResult;
use jiff::Timestamp;
use uuid::Uuid;

/// A student enrolled in exactly one school.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: Uuid,
    name: String,
    school_id: Uuid,
    version: i64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Student {
    /// New students are only created through `School::enroll_student`.
    pub(crate) fn create(name: &str, school_id: Uuid) -> AppResult<Self> {
        let name = normalize_name("name", "Student", name)?;
        let now = Timestamp::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            school_id,
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    pub(crate) fn rehydrate(
        id: Uuid,
        name: String,
        school_id: Uuid,
        version: i64,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            school_id,
            version,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn school_id(&self) -> Uuid {
        self.school_id
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

    pub fn belongs_to(&self, school_id: Uuid) -> bool {
        self.school_id == school_id
    }

    pub fn rename(&mut self, name: &str) -> AppResult<()> {
        self.name = normalize_name("name", "Student", name)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub(crate) fn committed(&mut self, version: i64, updated_at: Timestamp) {
        self.version = version;
        self.updated_at = updated_at;
    }
}
