use crate::RoleDto;

use serde::Serialize;

/// Role plus how many users currently hold it
#[derive(Debug, Serialize)]
pub struct RoleDetailResponse {
    pub role: RoleDto,
    pub user_count: u64,
}
