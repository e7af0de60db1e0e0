use application::transfer::{LogInDto, SignUpDto};
use serde::Deserialize;

use crate::controller::Intake;

#[derive(Deserialize)]
pub struct SignUpRequest {
    username: String,
    email: String,
    #[serde(alias = "firstname")]
    first_name: String,
    #[serde(alias = "lastname")]
    last_name: String,
    telephone: Option<String>,
    address: Option<String>,
    password: String,
}

impl std::fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
pub struct LogInRequest {
    username: String,
    password: String,
}

impl std::fmt::Debug for LogInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogInRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

pub struct AuthTransformer;

impl Intake<SignUpRequest> for AuthTransformer {
    type To = SignUpDto;
    fn emit(&self, input: SignUpRequest) -> Self::To {
        SignUpDto {
            name: input.username,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            telephone: input.telephone.filter(|value| !value.trim().is_empty()),
            address: input.address.filter(|value| !value.trim().is_empty()),
            password: input.password,
        }
    }
}

impl Intake<LogInRequest> for AuthTransformer {
    type To = LogInDto;
    fn emit(&self, input: LogInRequest) -> Self::To {
        LogInDto {
            name: input.username,
            password: input.password,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::controller::Intake;

    use super::{AuthTransformer, SignUpRequest};

    #[test]
    fn accepts_unseparated_name_fields() {
        let request: SignUpRequest = serde_json::from_value(serde_json::json!({
            "username": "ann",
            "email": "ann@example.com",
            "firstname": "Ann",
            "lastname": "Lee",
            "telephone": "",
            "password": "secret"
        }))
        .expect("valid body");
        let dto = AuthTransformer.emit(request);
        assert_eq!(dto.name, "ann");
        assert_eq!(dto.first_name, "Ann");
        assert_eq!(dto.last_name, "Lee");
        assert_eq!(dto.telephone, None);
        assert_eq!(dto.address, None);
    }
}
