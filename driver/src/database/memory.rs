//! Process-local storage used by tests and by builds without a database.
//!
//! A transaction holds the store lock for its whole lifetime and works on a
//! private copy, so transactions are serialized and a dropped transaction
//! leaves no trace.

use std::collections::HashMap;
use std::sync::Arc;

use error_stack::Report;
use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{CourseQuery, UserQuery};
use kernel::interface::update::{CourseModifier, EnrollmentModifier, UserModifier};
use kernel::prelude::entity::{
    Course, CourseId, EnrollmentOutcome, SelectLimit, SelectOffset, User, UserId, UserName,
};
use kernel::KernelError;

#[derive(Debug, Default, Clone)]
struct Store {
    users: HashMap<UserId, User>,
    courses: HashMap<CourseId, Course>,
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryDatabase {
    store: Arc<Mutex<Store>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let guard = Arc::clone(&self.store).lock_owned().await;
        let pending = guard.clone();
        Ok(InMemoryTransaction { guard, pending })
    }
}

pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<Store>,
    pending: Store,
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let InMemoryTransaction { mut guard, pending } = self;
        *guard = pending;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

/// Title, then id.
fn sort_courses(courses: &mut [Course]) {
    courses.sort_by(|a, b| {
        a.title()
            .cmp(b.title())
            .then_with(|| a.id().cmp(b.id()))
    });
}

fn page<T>(items: Vec<T>, limit: &SelectLimit, offset: &SelectOffset) -> Vec<T> {
    let skip = usize::try_from(*offset.as_ref()).unwrap_or(usize::MAX);
    let take = usize::try_from(*limit.as_ref()).unwrap_or(0);
    items.into_iter().skip(skip).take(take).collect()
}

pub struct InMemoryCourseRepository;

#[async_trait::async_trait]
impl CourseQuery for InMemoryCourseRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &CourseId,
    ) -> error_stack::Result<Option<Course>, KernelError> {
        Ok(con.pending.courses.get(id).cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Course>, KernelError> {
        let mut courses = con.pending.courses.values().cloned().collect::<Vec<_>>();
        sort_courses(&mut courses);
        Ok(page(courses, limit, offset))
    }

    async fn find_by_member(
        &self,
        con: &mut InMemoryTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Course>, KernelError> {
        let mut courses = con
            .pending
            .courses
            .values()
            .filter(|course| course.roster().contains(user_id))
            .cloned()
            .collect::<Vec<_>>();
        sort_courses(&mut courses);
        Ok(courses)
    }
}

#[async_trait::async_trait]
impl CourseModifier for InMemoryCourseRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        course: &Course,
    ) -> error_stack::Result<(), KernelError> {
        if con.pending.courses.contains_key(course.id()) {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("Course {} already exists", course.id())));
        }
        con.pending
            .courses
            .insert(course.id().clone(), course.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        course: &Course,
    ) -> error_stack::Result<(), KernelError> {
        let Some(current) = con.pending.courses.get_mut(course.id()) else {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("Course {} not found", course.id())));
        };
        if !course.capacity().holds(current.roster().len()) {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "Capacity {:?} is below the {} registered users of course {}",
                course.capacity(),
                current.roster().len(),
                course.id()
            )));
        }
        let roster = current.roster().clone();
        *current = course.clone().reconstruct(|course| course.roster = roster.clone());
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        course_id: &CourseId,
    ) -> error_stack::Result<(), KernelError> {
        con.pending.courses.remove(course_id);
        Ok(())
    }

    async fn clear(&self, con: &mut InMemoryTransaction) -> error_stack::Result<u64, KernelError> {
        let removed = con.pending.courses.drain().count();
        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }
}

pub struct InMemoryEnrollmentRepository;

#[async_trait::async_trait]
impl EnrollmentModifier for InMemoryEnrollmentRepository {
    type Transaction = InMemoryTransaction;

    async fn register(
        &self,
        con: &mut InMemoryTransaction,
        course_id: &CourseId,
        user_id: &UserId,
    ) -> error_stack::Result<EnrollmentOutcome, KernelError> {
        let outcome = match con.pending.courses.get_mut(course_id) {
            None => EnrollmentOutcome::CourseNotFound,
            Some(course) => course.register(user_id.clone()),
        };
        Ok(outcome)
    }

    async fn unregister(
        &self,
        con: &mut InMemoryTransaction,
        course_id: &CourseId,
        user_id: &UserId,
    ) -> error_stack::Result<EnrollmentOutcome, KernelError> {
        let outcome = match con.pending.courses.get_mut(course_id) {
            None => EnrollmentOutcome::CourseNotFound,
            Some(course) => course.unregister(user_id),
        };
        Ok(outcome)
    }
}

pub struct InMemoryUserRepository;

#[async_trait::async_trait]
impl UserQuery for InMemoryUserRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(con.pending.users.get(id).cloned())
    }

    async fn find_by_name(
        &self,
        con: &mut InMemoryTransaction,
        name: &UserName,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(con
            .pending
            .users
            .values()
            .find(|user| user.name() == name)
            .cloned())
    }

    async fn find_by_ids(
        &self,
        con: &mut InMemoryTransaction,
        ids: &[UserId],
    ) -> error_stack::Result<Vec<User>, KernelError> {
        let mut users = ids
            .iter()
            .filter_map(|id| con.pending.users.get(id))
            .cloned()
            .collect::<Vec<_>>();
        users.sort_by(|a, b| a.name().cmp(b.name()));
        users.dedup_by(|a, b| a.id() == b.id());
        Ok(users)
    }

    async fn search(
        &self,
        con: &mut InMemoryTransaction,
        search: &str,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<User>, KernelError> {
        let needle = search.to_lowercase();
        let mut users = con
            .pending
            .users
            .values()
            .filter(|user| {
                let fields: [&String; 4] = [
                    user.name().as_ref(),
                    user.email().as_ref(),
                    user.first_name().as_ref(),
                    user.last_name().as_ref(),
                ];
                fields
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect::<Vec<_>>();
        users.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(page(users, limit, offset))
    }
}

#[async_trait::async_trait]
impl UserModifier for InMemoryUserRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        let taken = con
            .pending
            .users
            .values()
            .any(|other| other.id() == user.id() || other.name() == user.name());
        if taken {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "Failed to create user `{}`",
                user.name().as_ref()
            )));
        }
        con.pending.users.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        let taken = con
            .pending
            .users
            .values()
            .any(|other| other.id() != user.id() && other.name() == user.name());
        if taken {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "Name `{}` is taken",
                user.name().as_ref()
            )));
        }
        if let Some(current) = con.pending.users.get_mut(user.id()) {
            *current = user.clone();
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<(), KernelError> {
        con.pending.courses.values_mut().for_each(|course| {
            course.unregister(user_id);
        });
        con.pending.users.remove(user_id);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::{CourseQuery, UserQuery};
    use kernel::interface::update::{CourseModifier, EnrollmentModifier, UserModifier};
    use kernel::prelude::entity::{
        ClassroomNumber, Course, CourseCapacity, CourseCode, CourseDescription, CourseId,
        CourseSchedule, CourseTitle, CreditHours, EnrollmentOutcome, FirstName, LastName,
        PasswordHash, Role, Roster, SelectLimit, SelectOffset, TuitionCost, User, UserEmail,
        UserId, UserName,
    };
    use kernel::KernelError;

    use super::{
        InMemoryCourseRepository, InMemoryDatabase, InMemoryEnrollmentRepository,
        InMemoryUserRepository,
    };

    fn course(title: &str, capacity: i32) -> Course {
        Course::new(
            CourseId::new(Uuid::new_v4()),
            CourseCode::default(),
            CourseTitle::new(title),
            CourseDescription::default(),
            CourseSchedule::default(),
            ClassroomNumber::default(),
            CreditHours::new(3),
            TuitionCost::new(0),
            CourseCapacity::new(capacity),
            Roster::default(),
        )
    }

    fn user(name: &str) -> User {
        User::new(
            UserId::new(Uuid::new_v4()),
            UserName::new(name),
            UserEmail::new(format!("{name}@example.com")),
            FirstName::new(name),
            LastName::new("Tester"),
            None,
            None,
            Role::Student,
            PasswordHash::new("hash"),
        )
    }

    #[tokio::test]
    async fn uncommitted_work_is_discarded() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let course = course("Algebra", 5);

        let mut con = db.transact().await?;
        InMemoryCourseRepository.create(&mut con, &course).await?;
        drop(con);

        let mut con = db.transact().await?;
        assert!(InMemoryCourseRepository
            .find_by_id(&mut con, course.id())
            .await?
            .is_none());
        InMemoryCourseRepository.create(&mut con, &course).await?;
        con.commit().await?;

        let mut con = db.transact().await?;
        let found = InMemoryCourseRepository.find_by_id(&mut con, course.id()).await?;
        assert_eq!(found, Some(course));
        Ok(())
    }

    #[tokio::test]
    async fn capacity_two_scenario() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let course = course("Physics", 2);
        let id = course.id().clone();
        InMemoryCourseRepository.create(&mut con, &course).await?;
        let (a, b, c) = (
            UserId::new(Uuid::new_v4()),
            UserId::new(Uuid::new_v4()),
            UserId::new(Uuid::new_v4()),
        );
        let repo = InMemoryEnrollmentRepository;

        assert_eq!(repo.register(&mut con, &id, &a).await?, EnrollmentOutcome::Registered);
        assert_eq!(repo.register(&mut con, &id, &b).await?, EnrollmentOutcome::Registered);
        assert_eq!(repo.register(&mut con, &id, &c).await?, EnrollmentOutcome::CourseFull);
        assert_eq!(repo.register(&mut con, &id, &a).await?, EnrollmentOutcome::AlreadyRegistered);
        assert_eq!(repo.unregister(&mut con, &id, &a).await?, EnrollmentOutcome::Unregistered);
        assert_eq!(repo.unregister(&mut con, &id, &a).await?, EnrollmentOutcome::NotRegistered);
        assert_eq!(repo.register(&mut con, &id, &c).await?, EnrollmentOutcome::Registered);

        let missing = CourseId::new(Uuid::new_v4());
        assert_eq!(repo.register(&mut con, &missing, &a).await?, EnrollmentOutcome::CourseNotFound);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_registrations_respect_capacity() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let course = course("Chemistry", 3);
        let id = course.id().clone();
        let mut con = db.transact().await?;
        InMemoryCourseRepository.create(&mut con, &course).await?;
        con.commit().await?;

        let attempts = (0..16)
            .map(|_| {
                let db = db.clone();
                let id = id.clone();
                tokio::spawn(async move {
                    let mut con = db.transact().await?;
                    let outcome = InMemoryEnrollmentRepository
                        .register(&mut con, &id, &UserId::new(Uuid::new_v4()))
                        .await?;
                    con.commit().await?;
                    error_stack::Result::<_, KernelError>::Ok(outcome)
                })
            })
            .collect::<Vec<_>>();
        let mut registered = 0;
        for attempt in attempts {
            if attempt.await.expect("task panicked")? == EnrollmentOutcome::Registered {
                registered += 1;
            }
        }
        assert_eq!(registered, 3);

        let mut con = db.transact().await?;
        let found = InMemoryCourseRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found.map(|course| course.roster().len()), Some(3));
        Ok(())
    }

    #[tokio::test]
    async fn lowering_capacity_below_roster_conflicts() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let course = course("Biology", 2);
        InMemoryCourseRepository.create(&mut con, &course).await?;
        for _ in 0..2 {
            InMemoryEnrollmentRepository
                .register(&mut con, course.id(), &UserId::new(Uuid::new_v4()))
                .await?;
        }

        let shrunk = course
            .clone()
            .reconstruct(|course| course.capacity = CourseCapacity::new(1));
        let result = InMemoryCourseRepository.update(&mut con, &shrunk).await;
        assert_eq!(
            result.map_err(|report| *report.current_context()),
            Err(KernelError::Conflict)
        );

        let renamed = course
            .clone()
            .reconstruct(|course| course.title = CourseTitle::new("Zoology"));
        InMemoryCourseRepository.update(&mut con, &renamed).await?;
        let found = InMemoryCourseRepository.find_by_id(&mut con, course.id()).await?;
        assert_eq!(found.as_ref().map(|course| course.roster().len()), Some(2));
        assert_eq!(
            found.map(|course| course.title().clone()),
            Some(CourseTitle::new("Zoology"))
        );
        Ok(())
    }

    #[tokio::test]
    async fn users_search_and_delete() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let (ann, bob) = (user("ann"), user("bob"));
        InMemoryUserRepository.create(&mut con, &bob).await?;
        InMemoryUserRepository.create(&mut con, &ann).await?;

        let duplicate = user("ann");
        let result = InMemoryUserRepository.create(&mut con, &duplicate).await;
        assert_eq!(
            result.map_err(|report| *report.current_context()),
            Err(KernelError::Conflict)
        );

        let all = InMemoryUserRepository
            .search(&mut con, "", &SelectLimit::default(), &SelectOffset::default())
            .await?;
        assert_eq!(all, vec![ann.clone(), bob.clone()]);
        let found = InMemoryUserRepository
            .search(&mut con, "BOB@", &SelectLimit::default(), &SelectOffset::default())
            .await?;
        assert_eq!(found, vec![bob.clone()]);

        let course = course("History", 10);
        InMemoryCourseRepository.create(&mut con, &course).await?;
        InMemoryEnrollmentRepository
            .register(&mut con, course.id(), ann.id())
            .await?;
        InMemoryUserRepository.delete(&mut con, ann.id()).await?;

        assert!(InMemoryUserRepository.find_by_id(&mut con, ann.id()).await?.is_none());
        let courses = InMemoryCourseRepository.find_by_member(&mut con, ann.id()).await?;
        assert!(courses.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn clear_removes_every_course() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        for title in ["Art", "Music", "Drama"] {
            InMemoryCourseRepository.create(&mut con, &course(title, 5)).await?;
        }
        assert_eq!(InMemoryCourseRepository.clear(&mut con).await?, 3);
        let left = InMemoryCourseRepository
            .find_all(&mut con, &SelectLimit::default(), &SelectOffset::default())
            .await?;
        assert!(left.is_empty());
        assert_eq!(InMemoryCourseRepository.clear(&mut con).await?, 0);
        Ok(())
    }
}
