//! Diesel row types for the `schools` and `students` tables.

mod school;
mod student;

pub use school::{NewSchool, SchoolRow};
pub use student::{NewStudent, StudentRow};
