use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(
    Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Fromln, AsRefln, Serialize, Deserialize,
)]
pub struct CourseTitle(String);

impl CourseTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }
}
