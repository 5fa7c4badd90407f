pub mod prelude;

pub mod opportunities;
pub mod users;
