use kernel::prelude::entity::EnrollmentOutcome;
use uuid::Uuid;

use crate::transfer::CourseDto;

#[derive(Debug)]
pub struct EnrollDto {
    pub course_id: Uuid,
    /// Defaults to the caller.
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct EnrollmentDto {
    pub outcome: EnrollmentOutcome,
    /// The course after the change, present only when the roster changed.
    pub course: Option<CourseDto>,
}
