use kernel::prelude::entity::{Course, DestructCourse, SelectLimit, SelectOffset};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDto {
    pub id: Uuid,
    pub code: String,
    pub title: String,
    pub description: String,
    pub schedule: String,
    pub classroom_number: String,
    pub credit_hours: i32,
    pub tuition_cost: i64,
    pub capacity: i32,
    pub roster: Vec<Uuid>,
}

impl From<Course> for CourseDto {
    fn from(value: Course) -> Self {
        let DestructCourse {
            id,
            code,
            title,
            description,
            schedule,
            classroom_number,
            credit_hours,
            tuition_cost,
            capacity,
            roster,
        } = value.into_destruct();
        Self {
            id: id.into(),
            code: code.into(),
            title: title.into(),
            description: description.into(),
            schedule: schedule.into(),
            classroom_number: classroom_number.into(),
            credit_hours: credit_hours.into(),
            tuition_cost: tuition_cost.into(),
            capacity: capacity.into(),
            roster: Vec::from(roster).into_iter().map(Uuid::from).collect(),
        }
    }
}

#[derive(Debug)]
pub struct GetCourseDto {
    pub id: Uuid,
}

#[derive(Debug)]
pub struct GetAllCourseDto {
    pub limit: SelectLimit,
    pub offset: SelectOffset,
}

#[derive(Debug, Default)]
pub struct CreateCourseDto {
    pub code: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub schedule: Option<String>,
    pub classroom_number: Option<String>,
    pub credit_hours: Option<i32>,
    pub tuition_cost: Option<i64>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Default)]
pub struct UpdateCourseDto {
    pub id: Uuid,
    pub code: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub schedule: Option<String>,
    pub classroom_number: Option<String>,
    pub credit_hours: Option<i32>,
    pub tuition_cost: Option<i64>,
    pub capacity: Option<i32>,
}

#[derive(Debug)]
pub struct DeleteCourseDto {
    pub id: Uuid,
}
