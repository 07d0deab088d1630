mod access;
mod bike;
mod rental;
mod user;

pub use self::{access::*, bike::*, rental::*, user::*};
