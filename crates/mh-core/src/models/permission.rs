//! The closed set of capabilities a role can grant.

use crate::{CoreError, Result as CoreResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// An atomic named capability gating one route class.
///
/// The set is a process-wide constant; roles reference members of it and
/// nothing mutates it at runtime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    ViewMeetings,
    ManageMeetings,
    ViewRoles,
    ManageRoles,
    ViewUsers,
    ManageUsers,
}

impl Permission {
    /// Every defined permission, in declaration order.
    pub const ALL: [Permission; 6] = [
        Permission::ViewMeetings,
        Permission::ManageMeetings,
        Permission::ViewRoles,
        Permission::ManageRoles,
        Permission::ViewUsers,
        Permission::ManageUsers,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::ViewMeetings => "VIEW_MEETINGS",
            Self::ManageMeetings => "MANAGE_MEETINGS",
            Self::ViewRoles => "VIEW_ROLES",
            Self::ManageRoles => "MANAGE_ROLES",
            Self::ViewUsers => "VIEW_USERS",
            Self::ManageUsers => "MANAGE_USERS",
        }
    }
}

impl FromStr for Permission {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "VIEW_MEETINGS" => Ok(Self::ViewMeetings),
            "MANAGE_MEETINGS" => Ok(Self::ManageMeetings),
            "VIEW_ROLES" => Ok(Self::ViewRoles),
            "MANAGE_ROLES" => Ok(Self::ManageRoles),
            "VIEW_USERS" => Ok(Self::ViewUsers),
            "MANAGE_USERS" => Ok(Self::ManageUsers),
            _ => Err(CoreError::InvalidPermission {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
