use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct CourseCapacity(i32);

impl CourseCapacity {
    pub fn new(capacity: impl Into<i32>) -> Self {
        Self(capacity.into())
    }

    pub fn is_valid(&self) -> bool {
        self.0 >= 1
    }

    pub fn admits(&self, roster_size: usize) -> bool {
        usize::try_from(self.0).is_ok_and(|capacity| roster_size < capacity)
    }

    pub fn holds(&self, roster_size: usize) -> bool {
        usize::try_from(self.0).is_ok_and(|capacity| roster_size <= capacity)
    }
}

impl Default for CourseCapacity {
    fn default() -> Self {
        Self::new(30)
    }
}

#[cfg(test)]
mod test {
    use super::CourseCapacity;

    #[test]
    fn admits_until_full() {
        let capacity = CourseCapacity::new(2);
        assert!(capacity.admits(0));
        assert!(capacity.admits(1));
        assert!(!capacity.admits(2));
        assert!(!capacity.admits(3));
        assert!(capacity.holds(2));
        assert!(!capacity.holds(3));
    }

    #[test]
    fn non_positive_is_invalid() {
        assert!(!CourseCapacity::new(0).is_valid());
        assert!(!CourseCapacity::new(-1).admits(0));
        assert!(CourseCapacity::default().is_valid());
    }
}
