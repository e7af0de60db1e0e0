use error_stack::ResultExt;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::update::{CourseModifier, DependOnCourseModifier};
use kernel::KernelError;

use crate::service::course::new_course;
use crate::transfer::CreateCourseDto;

/// Bulk loading and wiping of the course catalog.
///
/// Run by operators from the command line, so there is no session to authorize.
#[async_trait::async_trait]
pub trait CatalogService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnCourseModifier
{
    /// Every entry is validated before anything is written; one bad entry
    /// imports nothing.
    #[tracing::instrument(skip_all, fields(entries = entries.len()))]
    async fn import_courses(
        &self,
        entries: Vec<CreateCourseDto>,
    ) -> error_stack::Result<usize, KernelError> {
        let courses = entries
            .into_iter()
            .enumerate()
            .map(|(index, dto)| {
                new_course(dto).attach_printable_lazy(|| format!("catalog entry #{}", index + 1))
            })
            .collect::<error_stack::Result<Vec<_>, KernelError>>()?;

        let mut connection = self.database_connection().transact().await?;
        for course in &courses {
            self.course_modifier()
                .create(&mut connection, course)
                .await?;
        }
        connection.commit().await?;

        tracing::info!(imported = courses.len(), "catalog imported");
        Ok(courses.len())
    }

    #[tracing::instrument(skip_all)]
    async fn clear_courses(&self) -> error_stack::Result<u64, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let removed = self.course_modifier().clear(&mut connection).await?;
        connection.commit().await?;

        tracing::info!(removed, "catalog cleared");
        Ok(removed)
    }
}

impl<T> CatalogService for T where T: DependOnDatabaseConnection + DependOnCourseModifier {}
