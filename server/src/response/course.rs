use application::transfer::{CourseDto, UserDto};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use error_stack::Report;
use kernel::KernelError;
use serde::Serialize;
use uuid::Uuid;

use crate::controller::Exhaust;
use crate::error::ErrorStatus;
use crate::response::CreatedResponse;

#[derive(Debug, Serialize)]
pub struct CourseResponse {
    id: Uuid,
    code: String,
    title: String,
    description: String,
    schedule: String,
    classroom_number: String,
    credit_hours: i32,
    tuition_cost: i64,
    capacity: i32,
    roster: Vec<Uuid>,
}

impl From<CourseDto> for CourseResponse {
    fn from(value: CourseDto) -> Self {
        Self {
            id: value.id,
            code: value.code,
            title: value.title,
            description: value.description,
            schedule: value.schedule,
            classroom_number: value.classroom_number,
            credit_hours: value.credit_hours,
            tuition_cost: value.tuition_cost,
            capacity: value.capacity,
            roster: value.roster,
        }
    }
}

impl IntoResponse for CourseResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// A roster entry.
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    id: Uuid,
    username: String,
    first_name: String,
    last_name: String,
}

pub struct CoursePresenter;

impl Exhaust<()> for CoursePresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}

impl Exhaust<Uuid> for CoursePresenter {
    type To = CreatedResponse;
    fn emit(&self, input: Uuid) -> Self::To {
        CreatedResponse { id: input }
    }
}

impl Exhaust<CourseDto> for CoursePresenter {
    type To = CourseResponse;
    fn emit(&self, input: CourseDto) -> Self::To {
        CourseResponse::from(input)
    }
}

impl Exhaust<Option<CourseDto>> for CoursePresenter {
    type To = Result<CourseResponse, ErrorStatus>;
    fn emit(&self, input: Option<CourseDto>) -> Self::To {
        input.map(CourseResponse::from).ok_or_else(|| {
            ErrorStatus::from(Report::new(KernelError::NotFound).attach_printable("no such course"))
        })
    }
}

impl Exhaust<Vec<CourseDto>> for CoursePresenter {
    type To = Json<Vec<CourseResponse>>;
    fn emit(&self, input: Vec<CourseDto>) -> Self::To {
        Json(input.into_iter().map(CourseResponse::from).collect())
    }
}

impl Exhaust<Vec<UserDto>> for CoursePresenter {
    type To = Json<Vec<MemberResponse>>;
    fn emit(&self, input: Vec<UserDto>) -> Self::To {
        let members = input
            .into_iter()
            .map(|user| MemberResponse {
                id: user.id,
                username: user.name,
                first_name: user.first_name,
                last_name: user.last_name,
            })
            .collect();
        Json(members)
    }
}

#[cfg(test)]
mod test {
    use application::transfer::CourseDto;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use kernel::KernelError;

    use crate::controller::Exhaust;

    use super::CoursePresenter;

    #[tokio::test]
    async fn missing_course_answers_with_an_error_body() {
        let response = CoursePresenter.emit(None::<CourseDto>).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(body["error"], KernelError::NotFound.to_string());
    }
}
