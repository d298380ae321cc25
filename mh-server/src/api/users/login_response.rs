use mh_core::Permission;

use serde::Serialize;

/// Issued on a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: String,
    /// Bearer token for subsequent requests
    pub token: String,
    /// The caller's resolved permission union
    pub permissions: Vec<Permission>,
}
