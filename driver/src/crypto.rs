use error_stack::{Report, ResultExt};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use kernel::interface::credential::{PasswordHasher, TokenIssuer};
use kernel::prelude::entity::{AccessToken, PasswordHash, Role, Session, UserId};
use kernel::KernelError;

use crate::error::ConvertError;
use crate::{env, env_or};

static BCRYPT_COST: &str = "BCRYPT_COST";
static JWT_SECRET: &str = "JWT_SECRET";
static JWT_TTL_SECS: &str = "JWT_TTL_SECS";

#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Reads `BCRYPT_COST`, defaulting to 10.
    pub fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self::with_cost(env_or(BCRYPT_COST, bcrypt::DEFAULT_COST)?))
    }

    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

#[async_trait::async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, password: &str) -> error_stack::Result<PasswordHash, KernelError> {
        let password = password.to_owned();
        let cost = self.cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .convert_error()?
            .convert_error()?;
        Ok(PasswordHash::new(hash))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> error_stack::Result<bool, KernelError> {
        let password = password.to_owned();
        let hash = hash.as_ref().to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .convert_error()?
            .convert_error()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    role: Role,
    iat: i64,
    exp: i64,
}

/// HS256 tokens carrying the user id and role.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtTokenIssuer {
    /// Reads `JWT_SECRET` and `JWT_TTL_SECS` (one day when unset).
    pub fn new() -> error_stack::Result<Self, KernelError> {
        let secret = env(JWT_SECRET)?;
        if secret.is_empty() {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("`{JWT_SECRET}` must not be empty")));
        }
        let ttl = env_or(JWT_TTL_SECS, 86_400_i64)?;
        Ok(Self::from_secret(secret.as_bytes(), Duration::seconds(ttl)))
    }

    pub fn from_secret(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    fn encode(&self, claims: &Claims) -> error_stack::Result<AccessToken, KernelError> {
        let token = jsonwebtoken::encode(&Header::default(), claims, &self.encoding)
            .map_err(Report::from)
            .change_context(KernelError::Internal)?;
        Ok(AccessToken::new(token))
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, session: &Session) -> error_stack::Result<AccessToken, KernelError> {
        let now = OffsetDateTime::now_utc();
        self.encode(&Claims {
            sub: *session.user_id().as_ref(),
            role: *session.role(),
            iat: now.unix_timestamp(),
            exp: (now + self.ttl).unix_timestamp(),
        })
    }

    fn verify(&self, token: &AccessToken) -> error_stack::Result<UserId, KernelError> {
        let data = jsonwebtoken::decode::<Claims>(
            token.as_ref(),
            &self.decoding,
            &Validation::default(),
        )
        .convert_error()?;
        Ok(UserId::new(data.claims.sub))
    }
}
