mod admin;
mod auth;
mod course;
mod user;

pub use self::{admin::*, auth::*, course::*, user::*};
