//! Enrollment capacity value object.

use crate::error::{AppError, AppResult};
use serde::Serialize;

/// Upper bound on enrolled students for a school, always within
/// [`Capacity::MIN`]..=[`Capacity::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Capacity(i32);

impl Capacity {
    pub const MIN: i32 = 50;
    pub const MAX: i32 = 2000;

    pub fn new(value: i32) -> AppResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(AppError::validation(
                "capacity",
                format!("Capacity must be between {} and {}", Self::MIN, Self::MAX),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> i32 {
        self.0
    }

    /// Whether one more student fits given `current` enrollments.
    pub fn can_enroll(self, current: i64) -> bool {
        current < i64::from(self.0)
    }

    pub fn available_spots(self, current: i64) -> i64 {
        (i64::from(self.0) - current).max(0)
    }
}

impl TryFrom<i32> for Capacity {
    type Error = AppError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Capacity::new(value)
    }
}

impl std::fmt::Display for Capacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
