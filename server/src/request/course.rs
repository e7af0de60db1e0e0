use application::transfer::{
    CreateCourseDto, DeleteCourseDto, GetAllCourseDto, GetCourseDto, UpdateCourseDto,
};
use kernel::prelude::entity::{SelectLimit, SelectOffset};
use serde::Deserialize;
use uuid::Uuid;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    #[serde(alias = "string_id")]
    code: Option<String>,
    title: String,
    description: Option<String>,
    schedule: Option<String>,
    classroom_number: Option<String>,
    credit_hours: Option<i32>,
    tuition_cost: Option<i64>,
    capacity: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCourseRequest {
    #[serde(alias = "string_id")]
    code: Option<String>,
    title: Option<String>,
    description: Option<String>,
    schedule: Option<String>,
    classroom_number: Option<String>,
    credit_hours: Option<i32>,
    tuition_cost: Option<i64>,
    capacity: Option<i32>,
}

#[derive(Debug)]
pub struct DeleteCourseRequest {
    id: Uuid,
}

impl DeleteCourseRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug, Deserialize)]
pub struct GetAllCourseRequest {
    limit: Option<i64>,
    offset: Option<i64>,
}

#[derive(Debug)]
pub struct GetCourseRequest {
    id: Uuid,
}

impl GetCourseRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct CourseTransformer;

impl Intake<CreateCourseRequest> for CourseTransformer {
    type To = CreateCourseDto;
    fn emit(&self, input: CreateCourseRequest) -> Self::To {
        CreateCourseDto {
            code: input.code,
            title: input.title,
            description: input.description,
            schedule: input.schedule,
            classroom_number: input.classroom_number,
            credit_hours: input.credit_hours,
            tuition_cost: input.tuition_cost,
            capacity: input.capacity,
        }
    }
}

impl Intake<(Uuid, UpdateCourseRequest)> for CourseTransformer {
    type To = UpdateCourseDto;
    fn emit(&self, (id, input): (Uuid, UpdateCourseRequest)) -> Self::To {
        UpdateCourseDto {
            id,
            code: input.code,
            title: input.title,
            description: input.description,
            schedule: input.schedule,
            classroom_number: input.classroom_number,
            credit_hours: input.credit_hours,
            tuition_cost: input.tuition_cost,
            capacity: input.capacity,
        }
    }
}

impl Intake<DeleteCourseRequest> for CourseTransformer {
    type To = DeleteCourseDto;
    fn emit(&self, input: DeleteCourseRequest) -> Self::To {
        DeleteCourseDto { id: input.id }
    }
}

impl Intake<GetCourseRequest> for CourseTransformer {
    type To = GetCourseDto;
    fn emit(&self, input: GetCourseRequest) -> Self::To {
        GetCourseDto { id: input.id }
    }
}

impl Intake<GetAllCourseRequest> for CourseTransformer {
    type To = GetAllCourseDto;
    fn emit(&self, input: GetAllCourseRequest) -> Self::To {
        GetAllCourseDto {
            limit: input.limit.map(SelectLimit::new).unwrap_or_default(),
            offset: input.offset.map(SelectOffset::new).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod test {
    use kernel::prelude::entity::{SelectLimit, SelectOffset};
    use uuid::Uuid;

    use crate::controller::Intake;

    use super::{CourseTransformer, CreateCourseRequest, GetAllCourseRequest, UpdateCourseRequest};

    #[test]
    fn paging_defaults_and_clamps() {
        let dto = CourseTransformer.emit(GetAllCourseRequest {
            limit: None,
            offset: None,
        });
        assert_eq!(dto.limit, SelectLimit::default());
        assert_eq!(dto.offset, SelectOffset::default());

        let dto = CourseTransformer.emit(GetAllCourseRequest {
            limit: Some(10_000),
            offset: Some(-3),
        });
        assert_eq!(dto.limit, SelectLimit::new(SelectLimit::MAX));
        assert_eq!(dto.offset, SelectOffset::new(0));
    }

    #[test]
    fn update_keeps_absent_fields_absent() {
        let id = Uuid::new_v4();
        let request: UpdateCourseRequest =
            serde_json::from_str(r#"{"capacity": 12}"#).expect("valid body");
        let dto = CourseTransformer.emit((id, request));
        assert_eq!(dto.id, id);
        assert_eq!(dto.capacity, Some(12));
        assert!(dto.title.is_none());
        assert!(dto.tuition_cost.is_none());
        assert!(dto.code.is_none());
    }

    #[test]
    fn course_code_accepts_catalog_key() {
        let request: CreateCourseRequest =
            serde_json::from_str(r#"{"title": "Databases", "string_id": "CS-350"}"#)
                .expect("valid body");
        let dto = CourseTransformer.emit(request);
        assert_eq!(dto.code.as_deref(), Some("CS-350"));
        assert_eq!(dto.capacity, None);
    }
}
