pub mod areas;
pub mod permissions;
pub mod users;
