use sqlx::PgConnection;

use kernel::interface::update::EnrollmentModifier;
use kernel::prelude::entity::{CourseId, EnrollmentOutcome, UserId};
use kernel::KernelError;

use crate::database::postgres::course::PgCourseInternal;
use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresEnrollmentRepository;

#[async_trait::async_trait]
impl EnrollmentModifier for PostgresEnrollmentRepository {
    type Transaction = PostgresTransaction;

    async fn register(
        &self,
        con: &mut PostgresTransaction,
        course_id: &CourseId,
        user_id: &UserId,
    ) -> error_stack::Result<EnrollmentOutcome, KernelError> {
        PgEnrollmentInternal::register(con, course_id, user_id).await
    }

    async fn unregister(
        &self,
        con: &mut PostgresTransaction,
        course_id: &CourseId,
        user_id: &UserId,
    ) -> error_stack::Result<EnrollmentOutcome, KernelError> {
        PgEnrollmentInternal::unregister(con, course_id, user_id).await
    }
}

struct PgEnrollmentInternal;

impl PgEnrollmentInternal {
    /// Appends in a single conditional UPDATE. Postgres re-evaluates the WHERE
    /// clause against the latest row version once it holds the row lock, so two
    /// concurrent calls cannot both pass the capacity check.
    #[tracing::instrument(skip(con))]
    async fn register(
        con: &mut PgConnection,
        course_id: &CourseId,
        user_id: &UserId,
    ) -> error_stack::Result<EnrollmentOutcome, KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE courses
            SET roster = array_append(roster, $2)
            WHERE id = $1
              AND NOT ($2 = ANY(roster))
              AND cardinality(roster) < capacity
            "#,
        )
        .bind(course_id.as_ref())
        .bind(user_id.as_ref())
        .execute(&mut *con)
        .await
        .convert_error()?;
        if result.rows_affected() > 0 {
            return Ok(EnrollmentOutcome::Registered);
        }

        let outcome = match PgCourseInternal::find_by_id(con, course_id).await? {
            None => EnrollmentOutcome::CourseNotFound,
            // The record changed after the update was refused; it was full then.
            Some(course) => course
                .refuse_registration(user_id)
                .unwrap_or(EnrollmentOutcome::CourseFull),
        };
        Ok(outcome)
    }

    #[tracing::instrument(skip(con))]
    async fn unregister(
        con: &mut PgConnection,
        course_id: &CourseId,
        user_id: &UserId,
    ) -> error_stack::Result<EnrollmentOutcome, KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE courses
            SET roster = array_remove(roster, $2)
            WHERE id = $1
              AND $2 = ANY(roster)
            "#,
        )
        .bind(course_id.as_ref())
        .bind(user_id.as_ref())
        .execute(&mut *con)
        .await
        .convert_error()?;
        if result.rows_affected() > 0 {
            return Ok(EnrollmentOutcome::Unregistered);
        }

        let outcome = match PgCourseInternal::find_by_id(con, course_id).await? {
            None => EnrollmentOutcome::CourseNotFound,
            Some(_) => EnrollmentOutcome::NotRegistered,
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::CourseQuery;
    use kernel::interface::update::{CourseModifier, EnrollmentModifier};
    use kernel::prelude::entity::{
        ClassroomNumber, Course, CourseCapacity, CourseCode, CourseDescription, CourseId,
        CourseSchedule, CourseTitle, CreditHours, EnrollmentOutcome, Roster, TuitionCost, UserId,
    };
    use kernel::KernelError;

    use crate::database::postgres::{
        PostgresCourseRepository, PostgresDatabase, PostgresEnrollmentRepository,
    };

    fn course(capacity: i32) -> Course {
        Course::new(
            CourseId::new(Uuid::new_v4()),
            CourseCode::default(),
            CourseTitle::new(format!("Seminar {}", rand::random::<u16>())),
            CourseDescription::default(),
            CourseSchedule::default(),
            ClassroomNumber::default(),
            CreditHours::new(1),
            TuitionCost::new(0),
            CourseCapacity::new(capacity),
            Roster::default(),
        )
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn fills_then_frees_a_seat() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let course = course(2);
        let id = course.id().clone();
        PostgresCourseRepository.create(&mut con, &course).await?;
        let (a, b, c) = (
            UserId::new(Uuid::new_v4()),
            UserId::new(Uuid::new_v4()),
            UserId::new(Uuid::new_v4()),
        );
        let repo = PostgresEnrollmentRepository;

        assert_eq!(repo.register(&mut con, &id, &a).await?, EnrollmentOutcome::Registered);
        assert_eq!(repo.register(&mut con, &id, &a).await?, EnrollmentOutcome::AlreadyRegistered);
        assert_eq!(repo.register(&mut con, &id, &b).await?, EnrollmentOutcome::Registered);
        assert_eq!(repo.register(&mut con, &id, &c).await?, EnrollmentOutcome::CourseFull);
        assert_eq!(repo.unregister(&mut con, &id, &a).await?, EnrollmentOutcome::Unregistered);
        assert_eq!(repo.unregister(&mut con, &id, &a).await?, EnrollmentOutcome::NotRegistered);
        assert_eq!(repo.register(&mut con, &id, &c).await?, EnrollmentOutcome::Registered);

        let found = PostgresCourseRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(
            found.map(|course| course.roster().clone()),
            Some(Roster::new([b, c]))
        );

        let missing = CourseId::new(Uuid::new_v4());
        assert_eq!(repo.register(&mut con, &missing, &a).await?, EnrollmentOutcome::CourseNotFound);
        assert_eq!(repo.unregister(&mut con, &missing, &a).await?, EnrollmentOutcome::CourseNotFound);
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_registrations_respect_capacity() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let course = course(1);
        let id = course.id().clone();
        let mut con = db.transact().await?;
        PostgresCourseRepository.create(&mut con, &course).await?;
        con.commit().await?;

        let attempts = (0..2).map(|_| {
            let db = db.clone();
            let id = id.clone();
            tokio::spawn(async move {
                let mut con = db.transact().await?;
                let user = UserId::new(Uuid::new_v4());
                let outcome = PostgresEnrollmentRepository
                    .register(&mut con, &id, &user)
                    .await?;
                con.commit().await?;
                error_stack::Result::<_, KernelError>::Ok(outcome)
            })
        });
        let mut outcomes = Vec::new();
        for attempt in attempts.collect::<Vec<_>>() {
            outcomes.push(attempt.await.expect("task panicked")?);
        }
        outcomes.sort_by_key(|outcome| *outcome != EnrollmentOutcome::Registered);
        assert_eq!(
            outcomes,
            vec![EnrollmentOutcome::Registered, EnrollmentOutcome::CourseFull]
        );

        let mut con = db.transact().await?;
        PostgresCourseRepository.delete(&mut con, &id).await?;
        con.commit().await?;
        Ok(())
    }
}
