use error_stack::Report;

use kernel::interface::authorize::{Authorizer, Capability, DependOnAuthorizer};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{CourseQuery, DependOnCourseQuery, DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{
    Address, DestructUser, FirstName, LastName, Role, Session, Telephone, User, UserEmail, UserId,
};
use kernel::KernelError;

use crate::transfer::{
    CourseDto, DeleteUserDto, GetUserDto, PromoteUserDto, SearchUserDto, UpdateProfileDto, UserDto,
};

fn not_found(id: &UserId) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("User {id} not found"))
}

fn revise<T>(
    input: Option<String>,
    current: Option<T>,
    wrap: impl FnOnce(String) -> T,
) -> Option<T> {
    match input {
        None => current,
        Some(value) if value.trim().is_empty() => None,
        Some(value) => Some(wrap(value)),
    }
}

#[async_trait::async_trait]
pub trait GetUserService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnAuthorizer
    + DependOnUserQuery
    + DependOnCourseQuery
{
    async fn get_user(
        &self,
        session: &Session,
        dto: GetUserDto,
    ) -> error_stack::Result<Option<UserDto>, KernelError> {
        let id = UserId::new(dto.id);
        self.authorizer()
            .authorize(session, &Capability::ActAs(id.clone()))?;
        let mut connection = self.database_connection().transact().await?;
        let user = self.user_query().find_by_id(&mut connection, &id).await?;
        Ok(user.map(UserDto::from))
    }

    async fn search_users(
        &self,
        session: &Session,
        dto: SearchUserDto,
    ) -> error_stack::Result<Vec<UserDto>, KernelError> {
        self.authorizer()
            .authorize(session, &Capability::ManageUsers)?;
        let mut connection = self.database_connection().transact().await?;
        let users = self
            .user_query()
            .search(&mut connection, dto.search.trim(), &dto.limit, &dto.offset)
            .await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    /// Courses the user is registered for.
    async fn get_user_courses(
        &self,
        session: &Session,
        dto: GetUserDto,
    ) -> error_stack::Result<Vec<CourseDto>, KernelError> {
        let id = UserId::new(dto.id);
        self.authorizer()
            .authorize(session, &Capability::ActAs(id.clone()))?;
        let mut connection = self.database_connection().transact().await?;
        if self
            .user_query()
            .find_by_id(&mut connection, &id)
            .await?
            .is_none()
        {
            return Err(not_found(&id));
        }
        let courses = self
            .course_query()
            .find_by_member(&mut connection, &id)
            .await?;
        Ok(courses.into_iter().map(CourseDto::from).collect())
    }
}

impl<T> GetUserService for T where
    T: DependOnDatabaseConnection + DependOnAuthorizer + DependOnUserQuery + DependOnCourseQuery
{
}

#[async_trait::async_trait]
pub trait UpdateUserService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnAuthorizer
    + DependOnUserQuery
    + DependOnUserModifier
{
    /// Contact details only. Role and password are not editable here.
    ///
    /// An absent optional field is kept; a blank one is cleared.
    #[tracing::instrument(skip(self))]
    async fn update_profile(
        &self,
        session: &Session,
        dto: UpdateProfileDto,
    ) -> error_stack::Result<UserDto, KernelError> {
        let id = UserId::new(dto.id);
        self.authorizer()
            .authorize(session, &Capability::ActAs(id.clone()))?;
        let required = [&dto.email, &dto.first_name, &dto.last_name];
        if required
            .into_iter()
            .flatten()
            .any(|value| value.trim().is_empty())
        {
            return Err(Report::new(KernelError::Invalid)
                .attach_printable("email, first_name and last_name cannot be empty"));
        }

        let mut connection = self.database_connection().transact().await?;
        let user = self
            .user_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| not_found(&id))?;
        let DestructUser {
            name,
            email,
            first_name,
            last_name,
            telephone,
            address,
            role,
            password,
            ..
        } = user.into_destruct();
        let user = User::new(
            id.clone(),
            name,
            dto.email.map(UserEmail::new).unwrap_or(email),
            dto.first_name.map(FirstName::new).unwrap_or(first_name),
            dto.last_name.map(LastName::new).unwrap_or(last_name),
            revise(dto.telephone, telephone, Telephone::new),
            revise(dto.address, address, Address::new),
            role,
            password,
        );
        self.user_modifier().update(&mut connection, &user).await?;
        connection.commit().await?;

        Ok(UserDto::from(user))
    }

    #[tracing::instrument(skip(self))]
    async fn promote_user(
        &self,
        session: &Session,
        dto: PromoteUserDto,
    ) -> error_stack::Result<UserDto, KernelError> {
        self.authorizer()
            .authorize(session, &Capability::ManageUsers)?;
        let id = UserId::new(dto.id);
        let mut connection = self.database_connection().transact().await?;
        let user = self
            .user_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| not_found(&id))?;
        let user = user.reconstruct(|user| user.role = Role::Admin);
        self.user_modifier().update(&mut connection, &user).await?;
        connection.commit().await?;

        tracing::info!(user_id = %id, "user promoted to admin");
        Ok(UserDto::from(user))
    }
}

impl<T> UpdateUserService for T where
    T: DependOnDatabaseConnection + DependOnAuthorizer + DependOnUserQuery + DependOnUserModifier
{
}

#[async_trait::async_trait]
pub trait DeleteUserService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnAuthorizer
    + DependOnUserQuery
    + DependOnUserModifier
{
    #[tracing::instrument(skip(self))]
    async fn delete_user(
        &self,
        session: &Session,
        dto: DeleteUserDto,
    ) -> error_stack::Result<(), KernelError> {
        self.authorizer()
            .authorize(session, &Capability::ManageUsers)?;
        let id = UserId::new(dto.id);
        let mut connection = self.database_connection().transact().await?;
        if self
            .user_query()
            .find_by_id(&mut connection, &id)
            .await?
            .is_none()
        {
            return Err(not_found(&id));
        }
        self.user_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;

        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }
}

impl<T> DeleteUserService for T where
    T: DependOnDatabaseConnection + DependOnAuthorizer + DependOnUserQuery + DependOnUserModifier
{
}
