use error_stack::{Report, ResultExt};
use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::UserQuery;
use kernel::interface::update::UserModifier;
use kernel::prelude::entity::{
    Address, FirstName, LastName, PasswordHash, Role, SelectLimit, SelectOffset, Telephone, User,
    UserEmail, UserId, UserName,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresUserRepository;

#[async_trait::async_trait]
impl UserQuery for PostgresUserRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        PgUserInternal::find_by_id(con, id).await
    }

    async fn find_by_name(
        &self,
        con: &mut PostgresTransaction,
        name: &UserName,
    ) -> error_stack::Result<Option<User>, KernelError> {
        PgUserInternal::find_by_name(con, name).await
    }

    async fn find_by_ids(
        &self,
        con: &mut PostgresTransaction,
        ids: &[UserId],
    ) -> error_stack::Result<Vec<User>, KernelError> {
        PgUserInternal::find_by_ids(con, ids).await
    }

    async fn search(
        &self,
        con: &mut PostgresTransaction,
        search: &str,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<User>, KernelError> {
        PgUserInternal::search(con, search, limit, offset).await
    }
}

#[async_trait::async_trait]
impl UserModifier for PostgresUserRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        PgUserInternal::create(con, user).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        PgUserInternal::update(con, user).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<(), KernelError> {
        PgUserInternal::delete(con, user_id).await
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    first_name: String,
    last_name: String,
    telephone: Option<String>,
    address: Option<String>,
    role: String,
    password: String,
}

impl TryFrom<UserRow> for User {
    type Error = Report<KernelError>;
    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        Ok(User::new(
            UserId::new(value.id),
            UserName::new(value.name),
            UserEmail::new(value.email),
            FirstName::new(value.first_name),
            LastName::new(value.last_name),
            value.telephone.map(Telephone::new),
            value.address.map(Address::new),
            value.role.parse::<Role>()?,
            PasswordHash::new(value.password),
        ))
    }
}

/// Escapes `LIKE` wildcards so the input is matched literally.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

struct PgUserInternal;

impl PgUserInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        let row = sqlx::query_as::<_, UserRow>(
            // language=postgresql
            r#"
            SELECT id, name, email, first_name, last_name, telephone, address, role, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_name(
        con: &mut PgConnection,
        name: &UserName,
    ) -> error_stack::Result<Option<User>, KernelError> {
        let row = sqlx::query_as::<_, UserRow>(
            // language=postgresql
            r#"
            SELECT id, name, email, first_name, last_name, telephone, address, role, password
            FROM users
            WHERE name = $1
            "#,
        )
        .bind(name.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_ids(
        con: &mut PgConnection,
        ids: &[UserId],
    ) -> error_stack::Result<Vec<User>, KernelError> {
        let ids = ids.iter().map(|id| *id.as_ref()).collect::<Vec<Uuid>>();
        let rows = sqlx::query_as::<_, UserRow>(
            // language=postgresql
            r#"
            SELECT id, name, email, first_name, last_name, telephone, address, role, password
            FROM users
            WHERE id = ANY($1)
            ORDER BY name
            "#,
        )
        .bind(ids)
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(User::try_from).collect()
    }

    async fn search(
        con: &mut PgConnection,
        search: &str,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<User>, KernelError> {
        let rows = sqlx::query_as::<_, UserRow>(
            // language=postgresql
            r#"
            SELECT id, name, email, first_name, last_name, telephone, address, role, password
            FROM users
            WHERE name ILIKE $1
               OR email ILIKE $1
               OR first_name ILIKE $1
               OR last_name ILIKE $1
            ORDER BY name
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(like_pattern(search))
        .bind(limit.as_ref())
        .bind(offset.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(User::try_from).collect()
    }

    async fn create(con: &mut PgConnection, user: &User) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO users (id, name, email, first_name, last_name, telephone, address, role, password)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.id().as_ref())
        .bind(user.name().as_ref())
        .bind(user.email().as_ref())
        .bind(user.first_name().as_ref())
        .bind(user.last_name().as_ref())
        .bind(user.telephone().as_ref().map(AsRef::<String>::as_ref))
        .bind(user.address().as_ref().map(AsRef::<String>::as_ref))
        .bind(user.role().as_str())
        .bind(user.password().as_ref())
        .execute(con)
        .await
        .convert_error()
        .attach_printable_lazy(|| format!("Failed to create user `{}`", user.name().as_ref()))?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, user: &User) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE users
            SET name = $2, email = $3, first_name = $4, last_name = $5,
                telephone = $6, address = $7, role = $8, password = $9
            WHERE id = $1
            "#,
        )
        .bind(user.id().as_ref())
        .bind(user.name().as_ref())
        .bind(user.email().as_ref())
        .bind(user.first_name().as_ref())
        .bind(user.last_name().as_ref())
        .bind(user.telephone().as_ref().map(AsRef::<String>::as_ref))
        .bind(user.address().as_ref().map(AsRef::<String>::as_ref))
        .bind(user.role().as_str())
        .bind(user.password().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(con: &mut PgConnection, user_id: &UserId) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE courses
            SET roster = array_remove(roster, $1)
            WHERE $1 = ANY(roster)
            "#,
        )
        .bind(user_id.as_ref())
        .execute(&mut *con)
        .await
        .convert_error()?;
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
