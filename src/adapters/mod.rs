pub mod clock;
pub mod database;
