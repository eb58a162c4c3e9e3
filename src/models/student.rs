use crate::domain::Student;
use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StudentRow {
    pub id: Uuid,
    pub name: String,
    pub school_id: Uuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub version: i64,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Student::rehydrate(
            row.id,
            row.name,
            row.school_id,
            row.version,
            row.created_at.to_jiff(),
            row.updated_at.to_jiff(),
        )
    }
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::students)]
pub struct NewStudent {
    pub id: Uuid,
    pub name: String,
    pub school_id: Uuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub version: i64,
}

impl From<&Student> for NewStudent {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id(),
            name: student.name().to_string(),
            school_id: student.school_id(),
            created_at: student.created_at().into(),
            updated_at: student.updated_at().into(),
            version: student.version(),
        }
    }
}
