mod auth;
mod course;
mod enrollment;
mod user;

pub use self::{auth::*, course::*, enrollment::*, user::*};
