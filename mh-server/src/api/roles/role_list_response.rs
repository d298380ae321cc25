use crate::RoleDto;

use serde::Serialize;

/// All roles plus a result count
#[derive(Debug, Serialize)]
pub struct RoleListResponse {
    pub results: usize,
    pub roles: Vec<RoleDto>,
}
