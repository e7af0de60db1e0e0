use application::transfer::LoggedInDto;
use axum::Json;
use kernel::prelude::entity::Role;
use serde::Serialize;
use uuid::Uuid;

use crate::controller::Exhaust;
use crate::response::CreatedResponse;

#[derive(Debug, Serialize)]
pub struct LoggedInResponse {
    token: String,
    user: LoggedInUser,
}

#[derive(Debug, Serialize)]
pub struct LoggedInUser {
    id: Uuid,
    username: String,
    role: Role,
}

pub struct AuthPresenter;

impl Exhaust<Uuid> for AuthPresenter {
    type To = CreatedResponse;
    fn emit(&self, input: Uuid) -> Self::To {
        CreatedResponse { id: input }
    }
}

impl Exhaust<LoggedInDto> for AuthPresenter {
    type To = Json<LoggedInResponse>;
    fn emit(&self, input: LoggedInDto) -> Self::To {
        Json(LoggedInResponse {
            token: input.token,
            user: LoggedInUser {
                id: input.id,
                username: input.name,
                role: input.role,
            },
        })
    }
}
