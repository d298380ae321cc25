use mh_core::Permission;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}
