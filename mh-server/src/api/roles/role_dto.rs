use mh_core::{Permission, Role};

use serde::Serialize;

/// Role DTO for JSON serialization
#[derive(Debug, Serialize)]
pub struct RoleDto {
    pub id: String,
    pub name: String,
    pub color: String,
    pub permissions: Vec<Permission>,
}

impl From<Role> for RoleDto {
    fn from(role: Role) -> Self {
        Self {
            id: role.id.to_string(),
            name: role.name,
            color: role.color,
            permissions: role.permissions,
        }
    }
}
