use serde::Serialize;

/// Result of a register or unregister call. Refusals are ordinary values, not errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentOutcome {
    Registered,
    AlreadyRegistered,
    CourseFull,
    Unregistered,
    NotRegistered,
    CourseNotFound,
}

impl EnrollmentOutcome {
    /// Whether the roster was changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Registered | Self::Unregistered)
    }
}
