pub use super::opportunities::Entity as Opportunities;
pub use super::users::Entity as Users;
