//! Student enrollment use cases, always scoped to one school.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{DomainEventPublisher, Page, PageRequest, Student};
use crate::error::{AppError, AppResult};
use crate::repositories::{SchoolRepository, StudentRepository};

#[derive(Clone)]
pub struct StudentService {
    schools: Arc<dyn SchoolRepository>,
    students: Arc<dyn StudentRepository>,
    publisher: Arc<dyn DomainEventPublisher>,
}

impl StudentService {
    pub fn new(
        schools: Arc<dyn SchoolRepository>,
        students: Arc<dyn StudentRepository>,
        publisher: Arc<dyn DomainEventPublisher>,
    ) -> Self {
        Self {
            schools,
            students,
            publisher,
        }
    }

    /// Enrolls a student into a school that still has room.
    ///
    /// Events are published only after the enrollment has committed.
    pub async fn enroll_student(&self, school_id: Uuid, name: &str) -> AppResult<Student> {
        let enrollment = self.students.enroll(school_id, name).await?;
        self.publisher.publish_all(&enrollment.events).await;

        tracing::info!(
            student_id = %enrollment.student.id(),
            school_id = %school_id,
            "Student enrolled"
        );
        Ok(enrollment.student)
    }

    pub async fn get_student(&self, school_id: Uuid, student_id: Uuid) -> AppResult<Student> {
        self.students
            .find_in_school(school_id, student_id)
            .await?
            .ok_or(AppError::StudentNotInSchool {
                student_id,
                school_id,
            })
    }

    pub async fn update_student(
        &self,
        school_id: Uuid,
        student_id: Uuid,
        name: &str,
    ) -> AppResult<Student> {
        let mut student = self.get_student(school_id, student_id).await?;
        student.rename(name)?;
        self.students.update(&student).await
    }

    pub async fn delete_student(&self, school_id: Uuid, student_id: Uuid) -> AppResult<()> {
        if !self.students.exists_in_school(school_id, student_id).await? {
            return Err(AppError::StudentNotInSchool {
                student_id,
                school_id,
            });
        }
        self.students.delete_in_school(school_id, student_id).await?;
        tracing::info!(student_id = %student_id, school_id = %school_id, "Student removed");
        Ok(())
    }

    pub async fn search_students(
        &self,
        school_id: Uuid,
        query: &str,
        page: PageRequest,
    ) -> AppResult<Page<Student>> {
        if !self.schools.exists(school_id).await? {
            return Err(AppError::school_not_found(school_id));
        }
        self.students.search(school_id, query, page).await
    }
}
