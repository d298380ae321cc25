use mh_core::AttendanceEntry;

use serde::Serialize;

/// Feedback with the identity and attendance fields stripped.
#[derive(Debug, Serialize)]
pub struct FeedbackDto {
    pub feedback_rating: Option<i64>,
    pub feedback_description: Option<String>,
}

impl From<AttendanceEntry> for FeedbackDto {
    fn from(entry: AttendanceEntry) -> Self {
        Self {
            feedback_rating: entry.feedback_rating,
            feedback_description: entry.feedback_description,
        }
    }
}
