use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::Json;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use error_stack::Report;
use serde::de::DeserializeOwned;

use application::service::AuthenticateService;
use application::transfer::AuthenticateDto;
use kernel::prelude::entity::Session;
use kernel::KernelError;

use crate::error::ErrorStatus;
use crate::handler::AppModule;

/// The caller behind the `Authorization: Bearer` header.
pub struct Authenticated(pub Session);

#[async_trait::async_trait]
impl FromRequestParts<AppModule> for Authenticated {
    type Rejection = ErrorStatus;

    async fn from_request_parts(
        parts: &mut Parts,
        module: &AppModule,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, module)
                .await
                .map_err(|rejection| {
                    Report::new(KernelError::Unauthorized).attach_printable(rejection.to_string())
                })?;
        let session = module
            .authenticate(AuthenticateDto {
                token: bearer.token().to_string(),
            })
            .await?;
        Ok(Self(session))
    }
}

/// A JSON body that may be left out entirely.
///
/// An empty body yields `None`. Anything else must be JSON of the expected
/// shape, otherwise the request is rejected as `Invalid`.
pub struct OptionalJson<T>(pub Option<T>);

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|essence| essence.trim().to_ascii_lowercase())
        .is_some_and(|essence| {
            essence == "application/json"
                || (essence.starts_with("application/") && essence.ends_with("+json"))
        })
}

#[async_trait::async_trait]
impl<T, S> FromRequest<S> for OptionalJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ErrorStatus;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = is_json(req.headers());
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            Report::new(KernelError::Invalid).attach_printable(rejection.body_text())
        })?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(None));
        }
        if !json {
            return Err(Report::new(KernelError::Invalid)
                .attach_printable("Expected `Content-Type: application/json`")
                .into());
        }
        let Json(value) = Json::<T>::from_bytes(&bytes).map_err(|rejection| {
            Report::new(KernelError::Invalid).attach_printable(rejection.body_text())
        })?;
        Ok(Self(Some(value)))
    }
}

#[cfg(test)]
mod test {
    use axum::body::Body;
    use axum::extract::{FromRequest, Request};
    use axum::http::header::CONTENT_TYPE;
    use axum::http::StatusCode;
    use uuid::Uuid;

    use crate::controller::Intake;
    use crate::request::{EnrollRequest, EnrollmentTransformer};

    use super::OptionalJson;

    fn request(content_type: Option<&str>, body: &str) -> Request {
        let mut builder = axum::http::Request::builder()
            .method("POST")
            .uri("/courses/x/register");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body.to_string())).expect("request")
    }

    async fn target(req: Request) -> Result<Option<Uuid>, StatusCode> {
        let OptionalJson(body) = OptionalJson::<EnrollRequest>::from_request(req, &())
            .await
            .map_err(|error| error.status())?;
        Ok(EnrollmentTransformer.emit((Uuid::new_v4(), body)).user_id)
    }

    #[tokio::test]
    async fn empty_body_targets_the_caller() {
        assert_eq!(target(request(None, "")).await, Ok(None));
        assert_eq!(target(request(Some("application/json"), "")).await, Ok(None));
        assert_eq!(target(request(Some("application/json"), "{}")).await, Ok(None));
    }

    #[tokio::test]
    async fn named_user_is_read() {
        let user_id = Uuid::new_v4();
        let body = format!(r#"{{"user_id": "{user_id}"}}"#);
        let req = request(Some("application/json; charset=utf-8"), &body);
        assert_eq!(target(req).await, Ok(Some(user_id)));
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let cases = [
            (Some("application/json"), r#"{"user_id": "not-a-uuid"}"#),
            (Some("application/json"), r#"{"user_id": 42}"#),
            (Some("application/json"), r#"{"user_id": "#),
            (None, r#"{"user_id": "67e55044-10b1-426f-9247-bb680e5fe0c8"}"#),
            (Some("text/plain"), r#"{}"#),
        ];
        for (content_type, body) in cases {
            assert_eq!(
                target(request(content_type, body)).await,
                Err(StatusCode::BAD_REQUEST),
                "{content_type:?} {body}"
            );
        }
    }
}
