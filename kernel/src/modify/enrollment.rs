use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{CourseId, EnrollmentOutcome, UserId};
use crate::KernelError;

/// Roster mutation.
///
/// Implementations must check and write in one atomic step against the course
/// record, so that concurrent registrations can never push the roster past
/// its capacity.
#[async_trait::async_trait]
pub trait EnrollmentModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn register(
        &self,
        con: &mut Self::Transaction,
        course_id: &CourseId,
        user_id: &UserId,
    ) -> error_stack::Result<EnrollmentOutcome, KernelError>;

    async fn unregister(
        &self,
        con: &mut Self::Transaction,
        course_id: &CourseId,
        user_id: &UserId,
    ) -> error_stack::Result<EnrollmentOutcome, KernelError>;
}

pub trait DependOnEnrollmentModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type EnrollmentModifier: EnrollmentModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn enrollment_modifier(&self) -> &Self::EnrollmentModifier;
}
