use mh_core::User;

use serde::Serialize;

/// User DTO for JSON serialization
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub profile_url: Option<String>,
    /// Ordered role ids
    pub roles: Vec<String>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            profile_url: user.profile_url,
            roles: user.roles.iter().map(|id| id.to_string()).collect(),
        }
    }
}
