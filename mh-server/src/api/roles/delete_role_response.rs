use serde::Serialize;

/// Outcome of a role deletion: how many users had the role pulled from
/// their role list.
#[derive(Debug, Serialize)]
pub struct DeleteRoleResponse {
    pub modified_user_count: u64,
}
