use application::transfer::{
    DeleteUserDto, GetUserDto, PromoteUserDto, SearchUserDto, UpdateProfileDto,
};
use kernel::prelude::entity::{SelectLimit, SelectOffset};
use serde::Deserialize;
use uuid::Uuid;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct SearchUserRequest {
    search: Option<String>,
    limit: Option<i64>,
    offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    email: Option<String>,
    #[serde(alias = "firstname")]
    first_name: Option<String>,
    #[serde(alias = "lastname")]
    last_name: Option<String>,
    telephone: Option<String>,
    address: Option<String>,
}

#[derive(Debug)]
pub struct GetUserRequest {
    id: Uuid,
}

impl GetUserRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteUserRequest {
    id: Uuid,
}

impl DeleteUserRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct PromoteUserRequest {
    id: Uuid,
}

impl PromoteUserRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct UserTransformer;

impl Intake<SearchUserRequest> for UserTransformer {
    type To = SearchUserDto;
    fn emit(&self, input: SearchUserRequest) -> Self::To {
        SearchUserDto {
            search: input.search.unwrap_or_default(),
            limit: input.limit.map(SelectLimit::new).unwrap_or_default(),
            offset: input.offset.map(SelectOffset::new).unwrap_or_default(),
        }
    }
}

impl Intake<(Uuid, UpdateProfileRequest)> for UserTransformer {
    type To = UpdateProfileDto;
    fn emit(&self, (id, input): (Uuid, UpdateProfileRequest)) -> Self::To {
        UpdateProfileDto {
            id,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            telephone: input.telephone,
            address: input.address,
        }
    }
}

impl Intake<GetUserRequest> for UserTransformer {
    type To = GetUserDto;
    fn emit(&self, input: GetUserRequest) -> Self::To {
        GetUserDto { id: input.id }
    }
}

impl Intake<DeleteUserRequest> for UserTransformer {
    type To = DeleteUserDto;
    fn emit(&self, input: DeleteUserRequest) -> Self::To {
        DeleteUserDto { id: input.id }
    }
}

impl Intake<PromoteUserRequest> for UserTransformer {
    type To = PromoteUserDto;
    fn emit(&self, input: PromoteUserRequest) -> Self::To {
        PromoteUserDto { id: input.id }
    }
}
