mod auth;
mod catalog;
mod course;
mod enrollment;
mod user;

pub use self::{auth::*, catalog::*, course::*, enrollment::*, user::*};
