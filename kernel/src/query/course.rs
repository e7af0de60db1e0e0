use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Course, CourseId, SelectLimit, SelectOffset, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait CourseQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &CourseId,
    ) -> error_stack::Result<Option<Course>, KernelError>;

    /// Ordered by title, then id.
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Course>, KernelError>;

    /// Courses whose roster contains `user_id`, ordered by title, then id.
    async fn find_by_member(
        &self,
        con: &mut Self::Transaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Course>, KernelError>;
}

pub trait DependOnCourseQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type CourseQuery: CourseQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn course_query(&self) -> &Self::CourseQuery;
}
