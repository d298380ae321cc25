//! Meeting entity - a scheduling record with embedded attendance.

use crate::{AttendanceEntry, CoreError, MeetingKind, Result as CoreResult};

use std::collections::HashSet;
use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scheduled meeting or event.
///
/// `start_time`/`end_time` are absolute instants (millisecond epoch on the
/// wire). The attendance list is owned exclusively by the meeting: entries
/// never exist on their own and are keyed by user id within the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: Uuid,
    pub kind: MeetingKind,
    /// Id of the user that created the meeting.
    pub creator: String,
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    pub description: Option<String>,
    pub attendance: Vec<AttendanceEntry>,
}

impl Meeting {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: MeetingKind,
        creator: String,
        name: String,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        location: String,
        description: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            creator,
            name,
            start_time,
            end_time,
            location,
            description,
            attendance: Vec::new(),
        }
    }

    /// Validate the record before it is persisted.
    #[track_caller]
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation {
                message: "you must specify the meeting's name".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.location.trim().is_empty() {
            return Err(CoreError::Validation {
                message: "you must specify where the meeting is held".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.start_time > self.end_time {
            return Err(CoreError::Validation {
                message: "the meeting cannot end before it starts".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        validate_attendance(&self.attendance)
    }

    /// Attendance entry for the given user, when one exists.
    pub fn attendance_for(&self, user_id: &str) -> Option<&AttendanceEntry> {
        self.attendance.iter().find(|entry| entry.user == user_id)
    }
}

/// Validate a full attendance list: every entry valid, one entry per user.
#[track_caller]
pub fn validate_attendance(entries: &[AttendanceEntry]) -> CoreResult<()> {
    let mut seen: HashSet<&str> = HashSet::new();

    for entry in entries {
        entry.validate()?;
        if !seen.insert(entry.user.as_str()) {
            return Err(CoreError::Validation {
                message: format!("duplicate attendance entry for user {}", entry.user),
                location: ErrorLocation::from(Location::caller()),
            });
        }
    }

    Ok(())
}
