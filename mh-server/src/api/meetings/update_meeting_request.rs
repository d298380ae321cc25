use crate::AttendanceDto;

use serde::Deserialize;

/// Partial patch; absent fields keep their stored values.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateMeetingRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub attendance: Option<Vec<AttendanceDto>>,
}
