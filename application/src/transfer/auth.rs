use kernel::prelude::entity::Role;
use uuid::Uuid;

pub struct SignUpDto {
    pub name: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub telephone: Option<String>,
    pub address: Option<String>,
    pub password: String,
}

impl std::fmt::Debug for SignUpDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpDto")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

pub struct LogInDto {
    pub name: String,
    pub password: String,
}

impl std::fmt::Debug for LogInDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogInDto")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct LoggedInDto {
    pub token: String,
    pub id: Uuid,
    pub name: String,
    pub role: Role,
}

pub struct AuthenticateDto {
    pub token: String,
}
