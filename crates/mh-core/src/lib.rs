pub mod error;
pub mod models;

pub use error::{CoreError, Result};
pub use models::attendance::AttendanceEntry;
pub use models::meeting::{Meeting, validate_attendance};
pub use models::meeting_kind::MeetingKind;
pub use models::permission::Permission;
pub use models::role::Role;
pub use models::user::{User, UserSummary};

#[cfg(test)]
mod tests;
