mod capacity;
mod detail;
mod id;
mod roster;
mod title;

pub use self::{capacity::*, detail::*, id::*, roster::*, title::*};
use crate::entity::{EnrollmentOutcome, UserId};
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Course {
    id: CourseId,
    code: CourseCode,
    title: CourseTitle,
    description: CourseDescription,
    schedule: CourseSchedule,
    classroom_number: ClassroomNumber,
    credit_hours: CreditHours,
    tuition_cost: TuitionCost,
    capacity: CourseCapacity,
    roster: Roster,
}

impl Course {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: CourseId,
        code: CourseCode,
        title: CourseTitle,
        description: CourseDescription,
        schedule: CourseSchedule,
        classroom_number: ClassroomNumber,
        credit_hours: CreditHours,
        tuition_cost: TuitionCost,
        capacity: CourseCapacity,
        roster: Roster,
    ) -> Self {
        Self {
            id,
            code,
            title,
            description,
            schedule,
            classroom_number,
            credit_hours,
            tuition_cost,
            capacity,
            roster,
        }
    }

    /// Why `user_id` cannot join, or `None` when it can.
    ///
    /// Membership is checked before capacity so that a member re-submitting to a
    /// full course is told it is already registered.
    pub fn refuse_registration(&self, user_id: &UserId) -> Option<EnrollmentOutcome> {
        if self.roster.contains(user_id) {
            return Some(EnrollmentOutcome::AlreadyRegistered);
        }
        if !self.capacity.admits(self.roster.len()) {
            return Some(EnrollmentOutcome::CourseFull);
        }
        None
    }

    pub fn register(&mut self, user_id: UserId) -> EnrollmentOutcome {
        if let Some(refusal) = self.refuse_registration(&user_id) {
            return refusal;
        }
        self.roster.insert(user_id);
        EnrollmentOutcome::Registered
    }

    pub fn unregister(&mut self, user_id: &UserId) -> EnrollmentOutcome {
        if self.roster.remove(user_id) {
            EnrollmentOutcome::Unregistered
        } else {
            EnrollmentOutcome::NotRegistered
        }
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use crate::entity::{
        ClassroomNumber, Course, CourseCapacity, CourseCode, CourseDescription, CourseId,
        CourseSchedule, CourseTitle, CreditHours, EnrollmentOutcome, Roster, TuitionCost, UserId,
    };

    fn course(capacity: i32) -> Course {
        Course::new(
            CourseId::new(Uuid::new_v4()),
            CourseCode::new("CS-340"),
            CourseTitle::new("Compilers"),
            CourseDescription::default(),
            CourseSchedule::default(),
            ClassroomNumber::default(),
            CreditHours::new(3),
            TuitionCost::new(120000),
            CourseCapacity::new(capacity),
            Roster::default(),
        )
    }

    fn user() -> UserId {
        UserId::new(Uuid::new_v4())
    }

    #[test]
    fn fills_then_frees_a_seat() {
        let mut course = course(2);
        let (a, b, c) = (user(), user(), user());

        assert_eq!(course.register(a.clone()), EnrollmentOutcome::Registered);
        assert_eq!(course.register(b.clone()), EnrollmentOutcome::Registered);
        assert_eq!(course.register(c.clone()), EnrollmentOutcome::CourseFull);
        assert_eq!(course.roster(), &Roster::new([a.clone(), b.clone()]));

        assert_eq!(course.unregister(&a), EnrollmentOutcome::Unregistered);
        assert_eq!(course.register(c.clone()), EnrollmentOutcome::Registered);
        assert_eq!(course.roster(), &Roster::new([b, c]));
    }

    #[test]
    fn member_of_full_course_is_already_registered() {
        let mut course = course(1);
        let a = user();
        assert_eq!(course.register(a.clone()), EnrollmentOutcome::Registered);
        assert_eq!(course.register(a), EnrollmentOutcome::AlreadyRegistered);
        assert_eq!(course.roster().len(), 1);
    }

    #[test]
    fn unregister_twice() {
        let mut course = course(3);
        let a = user();
        course.register(a.clone());
        assert_eq!(course.unregister(&a), EnrollmentOutcome::Unregistered);
        assert_eq!(course.unregister(&a), EnrollmentOutcome::NotRegistered);
        assert!(course.roster().is_empty());
    }

    #[test]
    fn roster_never_exceeds_capacity() {
        let mut course = course(3);
        let users = (0..8).map(|_| user()).collect::<Vec<_>>();
        for (step, user) in users.iter().cycle().take(40).enumerate() {
            if step % 3 == 0 {
                course.unregister(user);
            } else {
                course.register(user.clone());
            }
            assert!(course.capacity().holds(course.roster().len()));
        }
    }
}
