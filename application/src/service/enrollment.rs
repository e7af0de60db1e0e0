use kernel::interface::authorize::{Authorizer, Capability, DependOnAuthorizer};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{CourseQuery, DependOnCourseQuery};
use kernel::interface::update::{DependOnEnrollmentModifier, EnrollmentModifier};
use kernel::prelude::entity::{CourseId, Session, UserId};
use kernel::KernelError;

use crate::transfer::{CourseDto, EnrollDto, EnrollmentDto};

/// Registers and unregisters users for courses.
///
/// A student always acts for themself. An admin acts for `dto.user_id` when
/// given. Refusals come back as an [`EnrollmentOutcome`](kernel::prelude::entity::EnrollmentOutcome),
/// the `Err` side is reserved for authorization and store failures.
#[async_trait::async_trait]
pub trait EnrollmentService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnAuthorizer
    + DependOnCourseQuery
    + DependOnEnrollmentModifier
{
    #[tracing::instrument(skip(self))]
    async fn register(
        &self,
        session: &Session,
        dto: EnrollDto,
    ) -> error_stack::Result<EnrollmentDto, KernelError> {
        let (course_id, user_id) = enrollment_target(session, &dto);
        self.authorizer()
            .authorize(session, &Capability::ActAs(user_id.clone()))?;

        let mut connection = self.database_connection().transact().await?;
        let outcome = self
            .enrollment_modifier()
            .register(&mut connection, &course_id, &user_id)
            .await?;
        let course = if outcome.is_applied() {
            self.course_query()
                .find_by_id(&mut connection, &course_id)
                .await?
        } else {
            None
        };
        connection.commit().await?;

        tracing::debug!(%course_id, %user_id, ?outcome, "register");
        Ok(EnrollmentDto {
            outcome,
            course: course.map(CourseDto::from),
        })
    }

    #[tracing::instrument(skip(self))]
    async fn unregister(
        &self,
        session: &Session,
        dto: EnrollDto,
    ) -> error_stack::Result<EnrollmentDto, KernelError> {
        let (course_id, user_id) = enrollment_target(session, &dto);
        self.authorizer()
            .authorize(session, &Capability::ActAs(user_id.clone()))?;

        let mut connection = self.database_connection().transact().await?;
        let outcome = self
            .enrollment_modifier()
            .unregister(&mut connection, &course_id, &user_id)
            .await?;
        let course = if outcome.is_applied() {
            self.course_query()
                .find_by_id(&mut connection, &course_id)
                .await?
        } else {
            None
        };
        connection.commit().await?;

        tracing::debug!(%course_id, %user_id, ?outcome, "unregister");
        Ok(EnrollmentDto {
            outcome,
            course: course.map(CourseDto::from),
        })
    }
}

impl<T> EnrollmentService for T where
    T: DependOnDatabaseConnection
        + DependOnAuthorizer
        + DependOnCourseQuery
        + DependOnEnrollmentModifier
{
}

fn enrollment_target(session: &Session, dto: &EnrollDto) -> (CourseId, UserId) {
    let user_id = dto
        .user_id
        .map(UserId::new)
        .unwrap_or_else(|| session.user_id().clone());
    (CourseId::new(dto.course_id), user_id)
}
