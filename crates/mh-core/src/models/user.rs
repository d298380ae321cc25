//! User entity - identity record keyed by the external identity provider.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user as stored.
///
/// The id is the identity provider's subject for this person. It is assigned
/// on first login and never regenerated, so it stays stable across logins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub profile_url: Option<String>,
    /// Ordered role references.
    pub roles: Vec<Uuid>,
}

impl User {
    pub fn new(id: String, name: String, profile_url: Option<String>) -> Self {
        Self {
            id,
            name,
            profile_url,
            roles: Vec::new(),
        }
    }
}

/// Denormalized user summary embedded when populating references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub profile_url: Option<String>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            profile_url: user.profile_url,
        }
    }
}
