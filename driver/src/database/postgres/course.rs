use error_stack::Report;
use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::CourseQuery;
use kernel::interface::update::CourseModifier;
use kernel::prelude::entity::{
    ClassroomNumber, Course, CourseCapacity, CourseCode, CourseDescription, CourseId,
    CourseSchedule, CourseTitle, CreditHours, Roster, SelectLimit, SelectOffset, TuitionCost,
    UserId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresCourseRepository;

#[async_trait::async_trait]
impl CourseQuery for PostgresCourseRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &CourseId,
    ) -> error_stack::Result<Option<Course>, KernelError> {
        PgCourseInternal::find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Course>, KernelError> {
        PgCourseInternal::find_all(con, limit, offset).await
    }

    async fn find_by_member(
        &self,
        con: &mut PostgresTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Course>, KernelError> {
        PgCourseInternal::find_by_member(con, user_id).await
    }
}

#[async_trait::async_trait]
impl CourseModifier for PostgresCourseRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        course: &Course,
    ) -> error_stack::Result<(), KernelError> {
        PgCourseInternal::create(con, course).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        course: &Course,
    ) -> error_stack::Result<(), KernelError> {
        PgCourseInternal::update(con, course).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        course_id: &CourseId,
    ) -> error_stack::Result<(), KernelError> {
        PgCourseInternal::delete(con, course_id).await
    }

    async fn clear(&self, con: &mut PostgresTransaction) -> error_stack::Result<u64, KernelError> {
        PgCourseInternal::clear(con).await
    }
}

#[derive(sqlx::FromRow)]
pub(in crate::database) struct CourseRow {
    id: Uuid,
    code: String,
    title: String,
    description: String,
    schedule: String,
    classroom_number: String,
    credit_hours: i32,
    tuition_cost: i64,
    capacity: i32,
    roster: Vec<Uuid>,
}

impl From<CourseRow> for Course {
    fn from(value: CourseRow) -> Self {
        Course::new(
            CourseId::new(value.id),
            CourseCode::new(value.code),
            CourseTitle::new(value.title),
            CourseDescription::new(value.description),
            CourseSchedule::new(value.schedule),
            ClassroomNumber::new(value.classroom_number),
            CreditHours::new(value.credit_hours),
            TuitionCost::new(value.tuition_cost),
            CourseCapacity::new(value.capacity),
            Roster::new(value.roster.into_iter().map(UserId::new)),
        )
    }
}

pub(in crate::database) struct PgCourseInternal;

impl PgCourseInternal {
    pub(in crate::database) async fn find_by_id(
        con: &mut PgConnection,
        id: &CourseId,
    ) -> error_stack::Result<Option<Course>, KernelError> {
        let row = sqlx::query_as::<_, CourseRow>(
            // language=postgresql
            r#"
            SELECT id, code, title, description, schedule, classroom_number,
                   credit_hours, tuition_cost, capacity, roster
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Course::from))
    }

    async fn find_all(
        con: &mut PgConnection,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Course>, KernelError> {
        let rows = sqlx::query_as::<_, CourseRow>(
            // language=postgresql
            r#"
            SELECT id, code, title, description, schedule, classroom_number,
                   credit_hours, tuition_cost, capacity, roster
            FROM courses
            ORDER BY title, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit.as_ref())
        .bind(offset.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Course::from).collect())
    }

    async fn find_by_member(
        con: &mut PgConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Course>, KernelError> {
        let rows = sqlx::query_as::<_, CourseRow>(
            // language=postgresql
            r#"
            SELECT id, code, title, description, schedule, classroom_number,
                   credit_hours, tuition_cost, capacity, roster
            FROM courses
            WHERE $1 = ANY(roster)
            ORDER BY title, id
            "#,
        )
        .bind(user_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Course::from).collect())
    }

    async fn create(con: &mut PgConnection, course: &Course) -> error_stack::Result<(), KernelError> {
        let roster = course.roster().iter().map(|id| *id.as_ref()).collect::<Vec<Uuid>>();
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO courses (id, title, description, schedule, classroom_number,
                                 credit_hours, tuition_cost, capacity, roster, code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(course.id().as_ref())
        .bind(course.title().as_ref())
        .bind(course.description().as_ref())
        .bind(course.schedule().as_ref())
        .bind(course.classroom_number().as_ref())
        .bind(course.credit_hours().as_ref())
        .bind(course.tuition_cost().as_ref())
        .bind(course.capacity().as_ref())
        .bind(roster)
        .bind(course.code().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, course: &Course) -> error_stack::Result<(), KernelError> {
        // The capacity guard lives in the WHERE clause so a concurrent
        // registration cannot slip in between the check and the write.
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE courses
            SET title = $2, description = $3, schedule = $4, classroom_number = $5,
                credit_hours = $6, tuition_cost = $7, capacity = $8, code = $9
            WHERE id = $1 AND cardinality(roster) <= $8
            "#,
        )
        .bind(course.id().as_ref())
        .bind(course.title().as_ref())
        .bind(course.description().as_ref())
        .bind(course.schedule().as_ref())
        .bind(course.classroom_number().as_ref())
        .bind(course.credit_hours().as_ref())
        .bind(course.tuition_cost().as_ref())
        .bind(course.capacity().as_ref())
        .bind(course.code().as_ref())
        .execute(&mut *con)
        .await
        .convert_error()?;
        if result.rows_affected() > 0 {
            return Ok(());
        }
        match Self::find_by_id(con, course.id()).await? {
            None => Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("Course {} not found", course.id()))),
            Some(current) => Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "Capacity {:?} is below the {} registered users of course {}",
                course.capacity(),
                current.roster().len(),
                course.id()
            ))),
        }
    }

    async fn delete(
        con: &mut PgConnection,
        course_id: &CourseId,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM courses
            WHERE id = $1
            "#,
        )
        .bind(course_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn clear(con: &mut PgConnection) -> error_stack::Result<u64, KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM courses
            "#,
        )
        .execute(con)
        .await
        .convert_error()?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::CourseQuery;
    use kernel::interface::update::CourseModifier;
    use kernel::prelude::entity::{
        ClassroomNumber, Course, CourseCapacity, CourseCode, CourseDescription, CourseId,
        CourseSchedule, CourseTitle, CreditHours, Roster, TuitionCost,
    };
    use kernel::KernelError;

    use crate::database::postgres::{PostgresCourseRepository, PostgresDatabase};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let id = CourseId::new(Uuid::new_v4());
        let course = Course::new(
            id.clone(),
            CourseCode::new("CS-330"),
            CourseTitle::new("Operating Systems"),
            CourseDescription::new("Processes, memory, files"),
            CourseSchedule::new("MWF 10:00"),
            ClassroomNumber::new("B-204"),
            CreditHours::new(4),
            TuitionCost::new(150000),
            CourseCapacity::new(25),
            Roster::default(),
        );
        PostgresCourseRepository.create(&mut con, &course).await?;

        let found = PostgresCourseRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(course.clone()));

        let course = course.reconstruct(|c| {
            c.code = CourseCode::new("CS-431");
            c.title = CourseTitle::new("Distributed Systems");
        });
        PostgresCourseRepository.update(&mut con, &course).await?;
        let found = PostgresCourseRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(course));

        PostgresCourseRepository.delete(&mut con, &id).await?;
        let found = PostgresCourseRepository.find_by_id(&mut con, &id).await?;
        assert!(found.is_none());
        Ok(())
    }
}
