use crate::RoleDto;

use serde::Serialize;

/// Single role response
#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub role: RoleDto,
}
