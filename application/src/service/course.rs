use error_stack::Report;
use uuid::Uuid;

use kernel::interface::authorize::{Authorizer, Capability, DependOnAuthorizer};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{CourseQuery, DependOnCourseQuery, DependOnUserQuery, UserQuery};
use kernel::interface::update::{CourseModifier, DependOnCourseModifier};
use kernel::prelude::entity::{
    ClassroomNumber, Course, CourseCapacity, CourseCode, CourseDescription, CourseId,
    CourseSchedule, CourseTitle, CreditHours, DestructCourse, Roster, Session, TuitionCost,
    UserId,
};
use kernel::KernelError;

use crate::transfer::{
    CourseDto, CreateCourseDto, DeleteCourseDto, GetAllCourseDto, GetCourseDto, UpdateCourseDto,
    UserDto,
};

fn check_amounts(
    credit_hours: Option<&CreditHours>,
    tuition_cost: Option<&TuitionCost>,
) -> error_stack::Result<(), KernelError> {
    if let Some(credit_hours) = credit_hours.filter(|hours| !hours.is_valid()) {
        return Err(Report::new(KernelError::Invalid)
            .attach_printable(format!("credit hours must not be negative: {credit_hours:?}")));
    }
    if let Some(tuition_cost) = tuition_cost.filter(|cost| !cost.is_valid()) {
        return Err(Report::new(KernelError::Invalid)
            .attach_printable(format!("tuition cost must not be negative: {tuition_cost:?}")));
    }
    Ok(())
}

/// Validates the input and builds a course with an empty roster.
pub(crate) fn new_course(dto: CreateCourseDto) -> error_stack::Result<Course, KernelError> {
    if dto.title.trim().is_empty() {
        return Err(Report::new(KernelError::Invalid).attach_printable("title is required"));
    }
    let capacity = dto
        .capacity
        .map(CourseCapacity::new)
        .unwrap_or_default();
    if !capacity.is_valid() {
        return Err(Report::new(KernelError::Invalid)
            .attach_printable(format!("capacity must be positive: {capacity:?}")));
    }
    let credit_hours = CreditHours::new(dto.credit_hours.unwrap_or_default());
    let tuition_cost = TuitionCost::new(dto.tuition_cost.unwrap_or_default());
    check_amounts(Some(&credit_hours), Some(&tuition_cost))?;

    Ok(Course::new(
        CourseId::new(Uuid::new_v4()),
        CourseCode::new(dto.code.unwrap_or_default()),
        CourseTitle::new(dto.title),
        CourseDescription::new(dto.description.unwrap_or_default()),
        CourseSchedule::new(dto.schedule.unwrap_or_default()),
        ClassroomNumber::new(dto.classroom_number.unwrap_or_default()),
        credit_hours,
        tuition_cost,
        capacity,
        Roster::default(),
    ))
}

#[async_trait::async_trait]
pub trait GetCourseService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnAuthorizer
    + DependOnCourseQuery
    + DependOnUserQuery
{
    async fn get_course(
        &self,
        session: &Session,
        dto: GetCourseDto,
    ) -> error_stack::Result<Option<CourseDto>, KernelError> {
        self.authorizer()
            .authorize(session, &Capability::ReadCourses)?;
        let mut connection = self.database_connection().transact().await?;
        let course = self
            .course_query()
            .find_by_id(&mut connection, &CourseId::new(dto.id))
            .await?;
        Ok(course.map(CourseDto::from))
    }

    async fn get_courses(
        &self,
        session: &Session,
        dto: GetAllCourseDto,
    ) -> error_stack::Result<Vec<CourseDto>, KernelError> {
        self.authorizer()
            .authorize(session, &Capability::ReadCourses)?;
        let mut connection = self.database_connection().transact().await?;
        let courses = self
            .course_query()
            .find_all(&mut connection, &dto.limit, &dto.offset)
            .await?;
        Ok(courses.into_iter().map(CourseDto::from).collect())
    }

    /// Members of a course, resolved to their profiles.
    async fn get_roster(
        &self,
        session: &Session,
        dto: GetCourseDto,
    ) -> error_stack::Result<Vec<UserDto>, KernelError> {
        self.authorizer()
            .authorize(session, &Capability::ManageCourses)?;
        let mut connection = self.database_connection().transact().await?;
        let course = self
            .course_query()
            .find_by_id(&mut connection, &CourseId::new(dto.id))
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("Course {} not found", dto.id))
            })?;
        let members = course.roster().iter().cloned().collect::<Vec<UserId>>();
        let users = self
            .user_query()
            .find_by_ids(&mut connection, &members)
            .await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }
}

impl<T> GetCourseService for T where
    T: DependOnDatabaseConnection + DependOnAuthorizer + DependOnCourseQuery + DependOnUserQuery
{
}

#[async_trait::async_trait]
pub trait CreateCourseService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnAuthorizer
    + DependOnCourseModifier
{
    #[tracing::instrument(skip(self))]
    async fn create_course(
        &self,
        session: &Session,
        dto: CreateCourseDto,
    ) -> error_stack::Result<Uuid, KernelError> {
        self.authorizer()
            .authorize(session, &Capability::ManageCourses)?;
        let course = new_course(dto)?;
        let uuid = Uuid::from(course.id().clone());

        let mut connection = self.database_connection().transact().await?;
        self.course_modifier()
            .create(&mut connection, &course)
            .await?;
        connection.commit().await?;

        tracing::info!(course_id = %uuid, "course created");
        Ok(uuid)
    }
}

impl<T> CreateCourseService for T where
    T: DependOnDatabaseConnection + DependOnAuthorizer + DependOnCourseModifier
{
}

#[async_trait::async_trait]
pub trait UpdateCourseService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnAuthorizer
    + DependOnCourseQuery
    + DependOnCourseModifier
{
    #[tracing::instrument(skip(self))]
    async fn update_course(
        &self,
        session: &Session,
        dto: UpdateCourseDto,
    ) -> error_stack::Result<CourseDto, KernelError> {
        self.authorizer()
            .authorize(session, &Capability::ManageCourses)?;
        if dto.title.as_ref().is_some_and(|title| title.trim().is_empty()) {
            return Err(Report::new(KernelError::Invalid).attach_printable("title is required"));
        }
        let capacity = dto.capacity.map(CourseCapacity::new);
        if capacity.is_some_and(|capacity| !capacity.is_valid()) {
            return Err(Report::new(KernelError::Invalid)
                .attach_printable(format!("capacity must be positive: {capacity:?}")));
        }
        let credit_hours = dto.credit_hours.map(CreditHours::new);
        let tuition_cost = dto.tuition_cost.map(TuitionCost::new);
        check_amounts(credit_hours.as_ref(), tuition_cost.as_ref())?;

        let id = CourseId::new(dto.id);
        let mut connection = self.database_connection().transact().await?;
        let course = self
            .course_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound).attach_printable(format!("Course {id} not found"))
            })?;

        let DestructCourse {
            code,
            title,
            description,
            schedule,
            classroom_number,
            credit_hours: current_credit_hours,
            tuition_cost: current_tuition_cost,
            capacity: current_capacity,
            roster,
            ..
        } = course.into_destruct();
        let course = Course::new(
            id.clone(),
            dto.code.map(CourseCode::new).unwrap_or(code),
            dto.title.map(CourseTitle::new).unwrap_or(title),
            dto.description
                .map(CourseDescription::new)
                .unwrap_or(description),
            dto.schedule.map(CourseSchedule::new).unwrap_or(schedule),
            dto.classroom_number
                .map(ClassroomNumber::new)
                .unwrap_or(classroom_number),
            credit_hours.unwrap_or(current_credit_hours),
            tuition_cost.unwrap_or(current_tuition_cost),
            capacity.unwrap_or(current_capacity),
            roster,
        );

        self.course_modifier()
            .update(&mut connection, &course)
            .await?;
        let updated = self
            .course_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound).attach_printable(format!("Course {id} not found"))
            })?;
        connection.commit().await?;

        Ok(CourseDto::from(updated))
    }
}

impl<T> UpdateCourseService for T where
    T: DependOnDatabaseConnection
        + DependOnAuthorizer
        + DependOnCourseQuery
        + DependOnCourseModifier
{
}

#[async_trait::async_trait]
pub trait DeleteCourseService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnAuthorizer
    + DependOnCourseQuery
    + DependOnCourseModifier
{
    #[tracing::instrument(skip(self))]
    async fn delete_course(
        &self,
        session: &Session,
        dto: DeleteCourseDto,
    ) -> error_stack::Result<(), KernelError> {
        self.authorizer()
            .authorize(session, &Capability::ManageCourses)?;
        let id = CourseId::new(dto.id);
        let mut connection = self.database_connection().transact().await?;
        if self
            .course_query()
            .find_by_id(&mut connection, &id)
            .await?
            .is_none()
        {
            return Err(
                Report::new(KernelError::NotFound).attach_printable(format!("Course {id} not found"))
            );
        }
        self.course_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;

        tracing::info!(course_id = %id, "course deleted");
        Ok(())
    }
}

impl<T> DeleteCourseService for T where
    T: DependOnDatabaseConnection
        + DependOnAuthorizer
        + DependOnCourseQuery
        + DependOnCourseModifier
{
}
