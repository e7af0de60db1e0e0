use serde::Serialize;
use vodca::{AsRefln, Fromln};

use crate::entity::UserId;

/// Member identifiers of a course. Insertion order is kept, duplicates are not.
#[derive(Debug, Default, Clone, Eq, PartialEq, Fromln, AsRefln, Serialize)]
pub struct Roster(Vec<UserId>);

impl Roster {
    pub fn new(members: impl IntoIterator<Item = UserId>) -> Self {
        let mut roster = Self::default();
        members.into_iter().for_each(|member| {
            roster.insert(member);
        });
        roster
    }

    pub fn contains(&self, user_id: &UserId) -> bool {
        self.0.contains(user_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserId> {
        self.0.iter()
    }

    pub(crate) fn insert(&mut self, user_id: UserId) -> bool {
        if self.contains(&user_id) {
            return false;
        }
        self.0.push(user_id);
        true
    }

    pub(crate) fn remove(&mut self, user_id: &UserId) -> bool {
        let before = self.0.len();
        self.0.retain(|member| member != user_id);
        before != self.0.len()
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use crate::entity::UserId;

    use super::Roster;

    #[test]
    fn members_are_kept_once_in_insertion_order() {
        let (a, b) = (UserId::new(Uuid::new_v4()), UserId::new(Uuid::new_v4()));
        let mut roster = Roster::new([a.clone(), b.clone(), a.clone()]);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.iter().collect::<Vec<_>>(), vec![&a, &b]);

        assert!(!roster.insert(b.clone()));
        assert!(roster.remove(&a));
        assert!(!roster.remove(&a));
        assert_eq!(Vec::from(roster), vec![b]);
    }
}
