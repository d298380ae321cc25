use mh_core::Permission;

use serde::Deserialize;

/// Partial patch; absent fields keep their stored values.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateRoleRequest {
    pub name: Option<String>,
    pub color: Option<String>,
    pub permissions: Option<Vec<Permission>>,
}
