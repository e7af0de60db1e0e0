use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct SelectLimit(i64);

impl SelectLimit {
    pub const MAX: i64 = 100;

    /// Values outside `1..=MAX` are clamped.
    pub fn new(value: impl Into<i64>) -> Self {
        SelectLimit(value.into().clamp(1, Self::MAX))
    }
}

impl Default for SelectLimit {
    fn default() -> Self {
        Self::new(30)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct SelectOffset(i64);

impl SelectOffset {
    pub fn new(value: impl Into<i64>) -> Self {
        SelectOffset(value.into().max(0))
    }
}

#[cfg(test)]
mod test {
    use super::{SelectLimit, SelectOffset};

    #[test]
    fn limit_is_clamped() {
        assert_eq!(SelectLimit::new(0), SelectLimit::new(1));
        assert_eq!(*SelectLimit::new(1000).as_ref(), SelectLimit::MAX);
        assert_eq!(*SelectLimit::default().as_ref(), 30);
    }

    #[test]
    fn negative_offset_is_zero() {
        assert_eq!(SelectOffset::new(-5), SelectOffset::default());
    }
}
