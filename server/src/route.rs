mod bike;
mod health;
mod rental;
mod user;

pub use self::{bike::*, health::*, rental::*, user::*};
