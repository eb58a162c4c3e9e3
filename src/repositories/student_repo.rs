//! Student repository backed by PostgreSQL.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::domain::{Page, PageRequest, Student};
use crate::error::{AppError, AppResult};
use crate::models::{NewStudent, StudentRow};
use crate::repositories::school_repo::lock_school;
use crate::repositories::{Enrollment, StudentRepository, contains_pattern};
use crate::schema::students;

#[derive(Clone)]
pub struct PgStudentRepository {
    pool: AsyncDbPool,
}

impl PgStudentRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn enroll(&self, school_id: Uuid, name: &str) -> AppResult<Enrollment> {
        let mut conn = self.pool.get().await?;
        let name = name.to_string();

        conn.transaction::<Enrollment, AppError, _>(|conn| {
            async move {
                // The row lock serializes concurrent enrollments into one school.
                let mut school = lock_school(conn, school_id).await?;
                let student = school.enroll_student(&name)?;

                diesel::insert_into(students::table)
                    .values(NewStudent::from(&student))
                    .execute(conn)
                    .await?;

                Ok(Enrollment {
                    student,
                    events: school.take_events(),
                })
            }
            .scope_boxed()
        })
        .await
    }

    async fn find_in_school(
        &self,
        school_id: Uuid,
        student_id: Uuid,
    ) -> AppResult<Option<Student>> {
        let mut conn = self.pool.get().await?;

        let row = students::table
            .filter(students::id.eq(student_id))
            .filter(students::school_id.eq(school_id))
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(row.map(Student::from))
    }

    async fn exists_in_school(&self, school_id: Uuid, student_id: Uuid) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        let count: i64 = students::table
            .filter(students::id.eq(student_id))
            .filter(students::school_id.eq(school_id))
            .count()
            .get_result(&mut conn)
            .await?;
        Ok(count > 0)
    }

    async fn update(&self, student: &Student) -> AppResult<Student> {
        let mut conn = self.pool.get().await?;

        let next_version = student.version() + 1;
        let affected = diesel::update(
            students::table
                .filter(students::id.eq(student.id()))
                .filter(students::school_id.eq(student.school_id()))
                .filter(students::version.eq(student.version())),
        )
        .set((
            students::name.eq(student.name()),
            students::updated_at.eq(Timestamp::from(student.updated_at())),
            students::version.eq(next_version),
        ))
        .execute(&mut conn)
        .await?;

        if affected == 0 {
            return Err(AppError::version_conflict("Student", student.id()));
        }

        let mut updated = student.clone();
        updated.committed(next_version, student.updated_at());
        Ok(updated)
    }

    async fn delete_in_school(&self, school_id: Uuid, student_id: Uuid) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(
            students::table
                .filter(students::id.eq(student_id))
                .filter(students::school_id.eq(school_id)),
        )
        .execute(&mut conn)
        .await?;
        Ok(deleted > 0)
    }

    async fn search(
        &self,
        school_id: Uuid,
        query: &str,
        page: PageRequest,
    ) -> AppResult<Page<Student>> {
        let mut conn = self.pool.get().await?;
        let pattern = contains_pattern(query);

        let total: i64 = students::table
            .filter(students::school_id.eq(school_id))
            .filter(students::name.ilike(pattern.as_str()))
            .count()
            .get_result(&mut conn)
            .await?;

        let rows: Vec<StudentRow> = students::table
            .filter(students::school_id.eq(school_id))
            .filter(students::name.ilike(pattern.as_str()))
            .order((students::name.asc(), students::id.asc()))
            .limit(page.limit())
            .offset(page.offset())
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await?;

        Ok(Page::new(
            rows.into_iter().map(Student::from).collect(),
            page,
            u64::try_from(total).unwrap_or(0),
        ))
    }
}
