use error_stack::Report;

use crate::entity::{Role, Session, UserId};
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Capability {
    ReadCourses,
    ManageCourses,
    ManageUsers,
    /// Act on behalf of the given user: enroll them, read or edit their profile.
    ActAs(UserId),
}

pub trait Authorizer: 'static + Sync + Send {
    fn authorize(
        &self,
        session: &Session,
        capability: &Capability,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnAuthorizer: 'static + Sync + Send {
    type Authorizer: Authorizer;
    fn authorizer(&self) -> &Self::Authorizer;
}

/// Admins hold every capability. Students read courses and act for themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoleAuthorizer;

impl Authorizer for RoleAuthorizer {
    fn authorize(
        &self,
        session: &Session,
        capability: &Capability,
    ) -> error_stack::Result<(), KernelError> {
        let granted = match (session.role(), capability) {
            (Role::Admin, _) => true,
            (Role::Student, Capability::ReadCourses) => true,
            (Role::Student, Capability::ActAs(user_id)) => user_id == session.user_id(),
            (Role::Student, Capability::ManageCourses | Capability::ManageUsers) => false,
        };
        if granted {
            Ok(())
        } else {
            Err(Report::new(KernelError::Forbidden).attach_printable(format!(
                "{} {} lacks {capability:?}",
                session.role(),
                session.user_id()
            )))
        }
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use crate::authorize::{Authorizer, Capability, RoleAuthorizer};
    use crate::entity::{Role, Session, UserId};
    use crate::KernelError;

    fn session(role: Role) -> Session {
        Session::new(UserId::new(Uuid::new_v4()), role)
    }

    #[test]
    fn student_acts_only_for_themself() {
        let student = session(Role::Student);
        let other = UserId::new(Uuid::new_v4());
        assert!(RoleAuthorizer
            .authorize(&student, &Capability::ActAs(student.user_id().clone()))
            .is_ok());
        let refused = RoleAuthorizer
            .authorize(&student, &Capability::ActAs(other))
            .unwrap_err();
        assert!(matches!(refused.current_context(), KernelError::Forbidden));
    }

    #[test]
    fn student_cannot_manage() {
        let student = session(Role::Student);
        assert!(RoleAuthorizer
            .authorize(&student, &Capability::ReadCourses)
            .is_ok());
        assert!(RoleAuthorizer
            .authorize(&student, &Capability::ManageCourses)
            .is_err());
        assert!(RoleAuthorizer
            .authorize(&student, &Capability::ManageUsers)
            .is_err());
    }

    #[test]
    fn admin_holds_everything() {
        let admin = session(Role::Admin);
        for capability in [
            Capability::ReadCourses,
            Capability::ManageCourses,
            Capability::ManageUsers,
            Capability::ActAs(UserId::new(Uuid::new_v4())),
        ] {
            assert!(RoleAuthorizer.authorize(&admin, &capability).is_ok());
        }
    }
}
