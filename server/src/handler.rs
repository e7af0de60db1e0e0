use std::ops::Deref;
use std::sync::Arc;

use driver::crypto::{BcryptHasher, JwtTokenIssuer};
use driver::database::{
    PostgresCourseRepository, PostgresDatabase, PostgresEnrollmentRepository,
    PostgresUserRepository,
};
use kernel::interface::authorize::{DependOnAuthorizer, RoleAuthorizer};
use kernel::interface::credential::{DependOnPasswordHasher, DependOnTokenIssuer};
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::query::{DependOnCourseQuery, DependOnUserQuery};
use kernel::interface::update::{
    DependOnCourseModifier, DependOnEnrollmentModifier, DependOnUserModifier,
};
use kernel::KernelError;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init().await?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler {
    pgpool: PostgresDatabase,
    authorizer: RoleAuthorizer,
    password_hasher: BcryptHasher,
    token_issuer: JwtTokenIssuer,
}

impl Handler {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let password_hasher = BcryptHasher::new()?;
        let token_issuer = JwtTokenIssuer::new()?;
        let pgpool = PostgresDatabase::new().await?;

        Ok(Self {
            pgpool,
            authorizer: RoleAuthorizer,
            password_hasher,
            token_issuer,
        })
    }
}

impl DependOnDatabaseConnection for Handler {
    type DatabaseConnection = PostgresDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.pgpool
    }
}

impl DependOnAuthorizer for Handler {
    type Authorizer = RoleAuthorizer;
    fn authorizer(&self) -> &Self::Authorizer {
        &self.authorizer
    }
}

impl DependOnPasswordHasher for Handler {
    type PasswordHasher = BcryptHasher;
    fn password_hasher(&self) -> &Self::PasswordHasher {
        &self.password_hasher
    }
}

impl DependOnTokenIssuer for Handler {
    type TokenIssuer = JwtTokenIssuer;
    fn token_issuer(&self) -> &Self::TokenIssuer {
        &self.token_issuer
    }
}

impl DependOnCourseQuery for Handler {
    type CourseQuery = PostgresCourseRepository;
    fn course_query(&self) -> &Self::CourseQuery {
        &PostgresCourseRepository
    }
}

impl DependOnCourseModifier for Handler {
    type CourseModifier = PostgresCourseRepository;
    fn course_modifier(&self) -> &Self::CourseModifier {
        &PostgresCourseRepository
    }
}

impl DependOnEnrollmentModifier for Handler {
    type EnrollmentModifier = PostgresEnrollmentRepository;
    fn enrollment_modifier(&self) -> &Self::EnrollmentModifier {
        &PostgresEnrollmentRepository
    }
}

impl DependOnUserQuery for Handler {
    type UserQuery = PostgresUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &PostgresUserRepository
    }
}

impl DependOnUserModifier for Handler {
    type UserModifier = PostgresUserRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &PostgresUserRepository
    }
}

/// Database access only, for the catalog maintenance commands.
pub struct CatalogHandler {
    pgpool: PostgresDatabase,
}

impl CatalogHandler {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        Ok(Self {
            pgpool: PostgresDatabase::new().await?,
        })
    }
}

impl DependOnDatabaseConnection for CatalogHandler {
    type DatabaseConnection = PostgresDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.pgpool
    }
}

impl DependOnCourseModifier for CatalogHandler {
    type CourseModifier = PostgresCourseRepository;
    fn course_modifier(&self) -> &Self::CourseModifier {
        &PostgresCourseRepository
    }
}
