mod bike;
mod common;
mod rental;
mod user;

pub use self::{bike::*, common::*, rental::*, user::*};
