use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Course, CourseId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait CourseModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        course: &Course,
    ) -> error_stack::Result<(), KernelError>;

    /// Writes every field except the roster.
    ///
    /// Fails with `NotFound` when the course is gone and with `Conflict` when the
    /// new capacity is below the current roster size.
    async fn update(
        &self,
        con: &mut Self::Transaction,
        course: &Course,
    ) -> error_stack::Result<(), KernelError>;

    async fn delete(
        &self,
        con: &mut Self::Transaction,
        course_id: &CourseId,
    ) -> error_stack::Result<(), KernelError>;

    /// Removes every course and returns how many were removed.
    async fn clear(&self, con: &mut Self::Transaction) -> error_stack::Result<u64, KernelError>;
}

pub trait DependOnCourseModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type CourseModifier: CourseModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn course_modifier(&self) -> &Self::CourseModifier;
}
