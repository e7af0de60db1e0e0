mod course;
mod enrollment;
mod user;

pub use self::{course::*, enrollment::*, user::*};
