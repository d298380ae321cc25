use serde::Deserialize;

/// Replaces a user's ordered role list.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRolesRequest {
    pub roles: Vec<String>,
}
