use crate::domain::{Capacity, School};
use crate::error::AppResult;
use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

/// School row as stored, without the enrollment count.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::schools)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SchoolRow {
    pub id: Uuid,
    pub name: String,
    pub capacity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub version: i64,
}

impl SchoolRow {
    /// Combines the row with its separately counted enrollment.
    pub fn into_domain(self, enrolled: i64) -> AppResult<School> {
        Ok(School::rehydrate(
            self.id,
            self.name,
            Capacity::new(self.capacity)?,
            enrolled,
            self.version,
            self.created_at.to_jiff(),
            self.updated_at.to_jiff(),
        ))
    }
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::schools)]
pub struct NewSchool {
    pub id: Uuid,
    pub name: String,
    pub capacity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub version: i64,
}

impl From<&School> for NewSchool {
    fn from(school: &School) -> Self {
        Self {
            id: school.id(),
            name: school.name().to_string(),
            capacity: school.capacity().value(),
            created_at: school.created_at().into(),
            updated_at: school.updated_at().into(),
            version: school.version(),
        }
    }
}
