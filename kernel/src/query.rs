mod course;
mod user;

pub use self::{course::*, user::*};
