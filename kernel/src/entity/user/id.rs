use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vodca::{AsRefln, Fromln};

/// Compared by value; the canonical text form is the lower-case hyphenated UUID.
#[derive(
    Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Fromln, AsRefln, Serialize, Deserialize,
)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new(id: impl Into<Uuid>) -> Self {
        Self(id.into())
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
