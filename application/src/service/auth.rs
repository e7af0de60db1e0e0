use error_stack::{Report, ResultExt};
use uuid::Uuid;

use kernel::interface::credential::{
    DependOnPasswordHasher, DependOnTokenIssuer, PasswordHasher, TokenIssuer,
};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{
    AccessToken, Address, FirstName, LastName, Role, Session, Telephone, User, UserEmail, UserId,
    UserName,
};
use kernel::KernelError;

use crate::transfer::{AuthenticateDto, LogInDto, LoggedInDto, SignUpDto};

#[async_trait::async_trait]
pub trait SignUpService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnPasswordHasher
    + DependOnUserModifier
{
    /// Creates a student account.
    #[tracing::instrument(skip(self))]
    async fn sign_up(&self, dto: SignUpDto) -> error_stack::Result<Uuid, KernelError> {
        let required = [
            ("name", &dto.name),
            ("email", &dto.email),
            ("first_name", &dto.first_name),
            ("last_name", &dto.last_name),
            ("password", &dto.password),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(
                Report::new(KernelError::Invalid).attach_printable(format!("{field} is required"))
            );
        }

        let password = self.password_hasher().hash(&dto.password).await?;
        let uuid = Uuid::new_v4();
        let user = User::new(
            UserId::new(uuid),
            UserName::new(dto.name.trim()),
            UserEmail::new(dto.email),
            FirstName::new(dto.first_name),
            LastName::new(dto.last_name),
            dto.telephone.map(Telephone::new),
            dto.address.map(Address::new),
            Role::Student,
            password,
        );

        let mut connection = self.database_connection().transact().await?;
        self.user_modifier().create(&mut connection, &user).await?;
        connection.commit().await?;

        tracing::info!(user_id = %uuid, "user signed up");
        Ok(uuid)
    }
}

impl<T> SignUpService for T where
    T: DependOnDatabaseConnection + DependOnPasswordHasher + DependOnUserModifier
{
}

#[async_trait::async_trait]
pub trait LogInService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnPasswordHasher
    + DependOnTokenIssuer
    + DependOnUserQuery
{
    #[tracing::instrument(skip(self))]
    async fn log_in(&self, dto: LogInDto) -> error_stack::Result<LoggedInDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let user = self
            .user_query()
            .find_by_name(&mut connection, &UserName::new(dto.name.trim()))
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Unauthorized).attach_printable("Unknown user name")
            })?;
        if !self
            .password_hasher()
            .verify(&dto.password, user.password())
            .await?
        {
            return Err(Report::new(KernelError::Unauthorized).attach_printable("Wrong password"));
        }

        let session = Session::new(user.id().clone(), *user.role());
        let token = self.token_issuer().issue(&session)?;
        Ok(LoggedInDto {
            token: token.into(),
            id: user.id().clone().into(),
            name: user.name().clone().into(),
            role: *user.role(),
        })
    }
}

impl<T> LogInService for T where
    T: DependOnDatabaseConnection + DependOnPasswordHasher + DependOnTokenIssuer + DependOnUserQuery
{
}

#[async_trait::async_trait]
pub trait AuthenticateService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnTokenIssuer + DependOnUserQuery
{
    /// Resolves a bearer token to the caller. The stored role wins over the one
    /// the token was issued with.
    async fn authenticate(&self, dto: AuthenticateDto) -> error_stack::Result<Session, KernelError> {
        let user_id = self.token_issuer().verify(&AccessToken::new(dto.token))?;
        let mut connection = self.database_connection().transact().await?;
        let user = self
            .user_query()
            .find_by_id(&mut connection, &user_id)
            .await?
            .ok_or_else(|| Report::new(KernelError::Unauthorized))
            .attach_printable_lazy(|| format!("Token subject {user_id} no longer exists"))?;
        Ok(Session::new(user.id().clone(), *user.role()))
    }
}

impl<T> AuthenticateService for T where
    T: DependOnDatabaseConnection + DependOnTokenIssuer + DependOnUserQuery
{
}
