mod bike;
mod rental;
mod user;

pub use self::{bike::*, rental::*, user::*};
