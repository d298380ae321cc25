use mh_core::AttendanceEntry;

use serde::{Deserialize, Serialize};

/// Attendance entry as carried over the wire, both directions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceDto {
    pub user: String,
    #[serde(default)]
    pub did_attend: bool,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub feedback_rating: Option<i64>,
    #[serde(default)]
    pub feedback_description: Option<String>,
}

impl From<AttendanceEntry> for AttendanceDto {
    fn from(entry: AttendanceEntry) -> Self {
        Self {
            user: entry.user,
            did_attend: entry.did_attend,
            notes: entry.notes,
            feedback_rating: entry.feedback_rating,
            feedback_description: entry.feedback_description,
        }
    }
}

impl From<AttendanceDto> for AttendanceEntry {
    fn from(dto: AttendanceDto) -> Self {
        Self {
            user: dto.user,
            did_attend: dto.did_attend,
            notes: dto.notes,
            feedback_rating: dto.feedback_rating,
            feedback_description: dto.feedback_description,
        }
    }
}
