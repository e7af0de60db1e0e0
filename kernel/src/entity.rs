mod common;
mod course;
mod enrollment;
mod session;
mod user;

pub use self::{common::*, course::*, enrollment::*, session::*, user::*};
