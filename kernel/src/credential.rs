use crate::entity::{AccessToken, PasswordHash, Session, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait PasswordHasher: 'static + Sync + Send {
    async fn hash(&self, password: &str) -> error_stack::Result<PasswordHash, KernelError>;
    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnPasswordHasher: 'static + Sync + Send {
    type PasswordHasher: PasswordHasher;
    fn password_hasher(&self) -> &Self::PasswordHasher;
}

pub trait TokenIssuer: 'static + Sync + Send {
    fn issue(&self, session: &Session) -> error_stack::Result<AccessToken, KernelError>;
    /// Fails with `Unauthorized` for a malformed, forged or expired token.
    fn verify(&self, token: &AccessToken) -> error_stack::Result<UserId, KernelError>;
}

pub trait DependOnTokenIssuer: 'static + Sync + Send {
    type TokenIssuer: TokenIssuer;
    fn token_issuer(&self) -> &Self::TokenIssuer;
}
