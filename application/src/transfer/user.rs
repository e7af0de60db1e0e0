use kernel::prelude::entity::{DestructUser, Role, SelectLimit, SelectOffset, User};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub telephone: Option<String>,
    pub address: Option<String>,
    pub role: Role,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let DestructUser {
            id,
            name,
            email,
            first_name,
            last_name,
            telephone,
            address,
            role,
            ..
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            telephone: telephone.map(String::from),
            address: address.map(String::from),
            role,
        }
    }
}

#[derive(Debug)]
pub struct GetUserDto {
    pub id: Uuid,
}

#[derive(Debug)]
pub struct SearchUserDto {
    pub search: String,
    pub limit: SelectLimit,
    pub offset: SelectOffset,
}

#[derive(Debug, Default)]
pub struct UpdateProfileDto {
    pub id: Uuid,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub telephone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug)]
pub struct PromoteUserDto {
    pub id: Uuid,
}

#[derive(Debug)]
pub struct DeleteUserDto {
    pub id: Uuid,
}
