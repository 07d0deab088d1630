pub mod config;
pub mod database;
pub mod error;

mod clock;

pub use self::clock::SystemClock;
