use crate::AttendanceDto;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateMeetingRequest {
    /// "meeting" or "event"
    #[serde(rename = "type")]
    pub kind: String,

    pub name: String,

    /// Millisecond epoch instants
    pub start_time: i64,
    pub end_time: i64,

    pub location: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Optional initial attendance list
    #[serde(default)]
    pub attendance: Vec<AttendanceDto>,
}
