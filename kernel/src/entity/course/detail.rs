use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Catalog code such as `CS-101`. Not required to be unique.
#[derive(Debug, Default, Clone, Eq, PartialEq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct CourseCode(String);

impl CourseCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct CourseDescription(String);

impl CourseDescription {
    pub fn new(description: impl Into<String>) -> Self {
        Self(description.into())
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct CourseSchedule(String);

impl CourseSchedule {
    pub fn new(schedule: impl Into<String>) -> Self {
        Self(schedule.into())
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct ClassroomNumber(String);

impl ClassroomNumber {
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }
}

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct CreditHours(i32);

impl CreditHours {
    pub fn new(hours: impl Into<i32>) -> Self {
        Self(hours.into())
    }

    pub fn is_valid(&self) -> bool {
        self.0 >= 0
    }
}

/// Tuition in cents.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct TuitionCost(i64);

impl TuitionCost {
    pub fn new(cost: impl Into<i64>) -> Self {
        Self(cost.into())
    }

    pub fn is_valid(&self) -> bool {
        self.0 >= 0
    }
}
