use application::transfer::EnrollmentDto;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kernel::prelude::entity::EnrollmentOutcome;
use serde::Serialize;

use crate::controller::Exhaust;
use crate::response::CourseResponse;

/// Body sent when the roster was left unchanged.
#[derive(Debug, Serialize)]
pub struct RefusalResponse {
    error: &'static str,
    reason: EnrollmentOutcome,
}

fn refusal(reason: EnrollmentOutcome) -> Response {
    let (status, error) = match reason {
        EnrollmentOutcome::AlreadyRegistered => {
            (StatusCode::BAD_REQUEST, "User already registered for this course")
        }
        EnrollmentOutcome::CourseFull => (StatusCode::BAD_REQUEST, "Course is full"),
        EnrollmentOutcome::NotRegistered => {
            (StatusCode::BAD_REQUEST, "User is not registered for this course")
        }
        EnrollmentOutcome::CourseNotFound
        | EnrollmentOutcome::Registered
        | EnrollmentOutcome::Unregistered => (StatusCode::NOT_FOUND, "Course not found"),
    };
    (status, Json(RefusalResponse { error, reason })).into_response()
}

pub struct EnrollmentPresenter;

impl Exhaust<EnrollmentDto> for EnrollmentPresenter {
    type To = Response;
    fn emit(&self, input: EnrollmentDto) -> Self::To {
        match input.course {
            Some(course) if input.outcome.is_applied() => {
                CourseResponse::from(course).into_response()
            }
            // The course vanished after the roster change.
            None if input.outcome.is_applied() => refusal(EnrollmentOutcome::CourseNotFound),
            _ => refusal(input.outcome),
        }
    }
}

#[cfg(test)]
mod test {
    use application::transfer::{CourseDto, EnrollmentDto};
    use axum::http::StatusCode;
    use axum::response::Response;
    use kernel::prelude::entity::EnrollmentOutcome;
    use serde_json::Value;
    use uuid::Uuid;

    use crate::controller::Exhaust;

    use super::EnrollmentPresenter;

    fn course() -> CourseDto {
        CourseDto {
            id: Uuid::new_v4(),
            code: "CS-340".to_string(),
            title: "Compilers".to_string(),
            description: String::new(),
            schedule: String::new(),
            classroom_number: String::new(),
            credit_hours: 3,
            tuition_cost: 0,
            capacity: 2,
            roster: vec![Uuid::new_v4()],
        }
    }

    async fn json(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&body).expect("json")
    }

    #[tokio::test]
    async fn applied_outcomes_return_the_course() {
        let course = course();
        for outcome in [EnrollmentOutcome::Registered, EnrollmentOutcome::Unregistered] {
            let response = EnrollmentPresenter.emit(EnrollmentDto {
                outcome,
                course: Some(course.clone()),
            });
            assert_eq!(response.status(), StatusCode::OK);
            let body = json(response).await;
            assert_eq!(body["id"], course.id.to_string());
            assert_eq!(body["roster"][0], course.roster[0].to_string());
        }
    }

    #[tokio::test]
    async fn refusals_carry_a_reason() {
        let cases = [
            (EnrollmentOutcome::CourseNotFound, StatusCode::NOT_FOUND, "course_not_found"),
            (EnrollmentOutcome::AlreadyRegistered, StatusCode::BAD_REQUEST, "already_registered"),
            (EnrollmentOutcome::CourseFull, StatusCode::BAD_REQUEST, "course_full"),
            (EnrollmentOutcome::NotRegistered, StatusCode::BAD_REQUEST, "not_registered"),
        ];
        for (outcome, status, reason) in cases {
            let response = EnrollmentPresenter.emit(EnrollmentDto {
                outcome,
                course: None,
            });
            assert_eq!(response.status(), status);
            let body = json(response).await;
            assert_eq!(body["reason"], reason);
            assert!(body["error"].as_str().is_some_and(|error| !error.is_empty()));
        }
    }
}
