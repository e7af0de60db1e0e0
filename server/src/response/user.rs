use application::transfer::{CourseDto, UserDto};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use error_stack::Report;
use kernel::prelude::entity::Role;
use kernel::KernelError;
use serde::Serialize;
use uuid::Uuid;

use crate::controller::Exhaust;
use crate::error::ErrorStatus;
use crate::response::CourseResponse;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    id: Uuid,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    telephone: Option<String>,
    address: Option<String>,
    role: Role,
}

impl From<UserDto> for UserResponse {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            username: value.name,
            email: value.email,
            first_name: value.first_name,
            last_name: value.last_name,
            telephone: value.telephone,
            address: value.address,
            role: value.role,
        }
    }
}

impl IntoResponse for UserResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct UserPresenter;

impl Exhaust<()> for UserPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}

impl Exhaust<UserDto> for UserPresenter {
    type To = UserResponse;
    fn emit(&self, input: UserDto) -> Self::To {
        UserResponse::from(input)
    }
}

impl Exhaust<Option<UserDto>> for UserPresenter {
    type To = Result<UserResponse, ErrorStatus>;
    fn emit(&self, input: Option<UserDto>) -> Self::To {
        input.map(UserResponse::from).ok_or_else(|| {
            ErrorStatus::from(Report::new(KernelError::NotFound).attach_printable("no such user"))
        })
    }
}

impl Exhaust<Vec<UserDto>> for UserPresenter {
    type To = Json<Vec<UserResponse>>;
    fn emit(&self, input: Vec<UserDto>) -> Self::To {
        Json(input.into_iter().map(UserResponse::from).collect())
    }
}

impl Exhaust<Vec<CourseDto>> for UserPresenter {
    type To = Json<Vec<CourseResponse>>;
    fn emit(&self, input: Vec<CourseDto>) -> Self::To {
        Json(input.into_iter().map(CourseResponse::from).collect())
    }
}

#[cfg(test)]
mod test {
    use application::transfer::UserDto;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use kernel::prelude::entity::Role;
    use uuid::Uuid;

    use crate::controller::Exhaust;

    use super::UserPresenter;

    #[test]
    fn user_is_rendered_without_credentials() {
        let response = UserPresenter.emit(UserDto {
            id: Uuid::new_v4(),
            name: "ann".to_string(),
            email: "ann@example.com".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            telephone: None,
            address: Some("1 Main St".to_string()),
            role: Role::Student,
        });
        let body = serde_json::to_value(&response).expect("json");
        assert_eq!(body["username"], "ann");
        assert_eq!(body["role"], "student");
        assert_eq!(body["telephone"], serde_json::Value::Null);
        assert!(body.get("password").is_none());
    }

    #[test]
    fn missing_user_is_not_found() {
        let response = UserPresenter.emit(None::<UserDto>).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
