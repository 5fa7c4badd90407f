pub mod opportunity;
pub mod user;
