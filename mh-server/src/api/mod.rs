pub mod error;
pub mod events;
pub mod extractors;
pub mod meetings;
pub mod roles;
pub mod users;
