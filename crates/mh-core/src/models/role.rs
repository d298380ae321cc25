//! Role entity - a named, persisted grouping of permissions.

use crate::Permission;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role names that are exempt from rename and delete.
pub const PROTECTED_ROLE_NAMES: [&str; 2] = ["Default", "Admin"];

/// A named set of permissions assignable to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub permissions: Vec<Permission>,
}

impl Role {
    pub fn new(name: String, color: String, permissions: Vec<Permission>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            color,
            permissions,
        }
    }

    /// "Default" and "Admin" cannot be renamed or deleted.
    pub fn is_protected(&self) -> bool {
        PROTECTED_ROLE_NAMES.contains(&self.name.as_str())
    }

    /// Union of permissions across a user's roles.
    pub fn permission_union(roles: &[Role]) -> HashSet<Permission> {
        roles
            .iter()
            .flat_map(|role| role.permissions.iter().copied())
            .collect()
    }
}
