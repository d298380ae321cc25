pub mod error;
pub mod pool;
pub mod query;
pub mod repositories;

pub use error::{DbError, Result};
pub use pool::{connect, migrate};
pub use query::{MeetingPredicate, Page, PageRequest};
pub use repositories::meeting_repository::{MeetingRepository, PopulatedMeeting};
pub use repositories::role_repository::RoleRepository;
pub use repositories::user_repository::{UserRepository, UserWithRoles};
