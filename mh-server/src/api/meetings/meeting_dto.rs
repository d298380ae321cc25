use crate::AttendanceDto;

use mh_core::UserSummary;
use mh_db::PopulatedMeeting;

use serde::Serialize;

/// Meeting DTO for JSON serialization, creator reference resolved.
#[derive(Debug, Serialize)]
pub struct MeetingDto {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub creator: CreatorDto,
    pub name: String,
    /// Millisecond epoch instants
    pub start_time: i64,
    pub end_time: i64,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub attendance: Vec<AttendanceDto>,
}

/// Denormalized creator summary
#[derive(Debug, Serialize)]
pub struct CreatorDto {
    pub id: String,
    pub name: String,
    pub profile_url: Option<String>,
}

impl From<UserSummary> for CreatorDto {
    fn from(summary: UserSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            profile_url: summary.profile_url,
        }
    }
}

impl From<PopulatedMeeting> for MeetingDto {
    fn from(populated: PopulatedMeeting) -> Self {
        let meeting = populated.meeting;
        Self {
            id: meeting.id.to_string(),
            kind: meeting.kind.as_str().to_string(),
            creator: populated.creator.into(),
            name: meeting.name,
            start_time: meeting.start_time.timestamp_millis(),
            end_time: meeting.end_time.timestamp_millis(),
            location: meeting.location,
            description: meeting.description,
            attendance: meeting.attendance.into_iter().map(Into::into).collect(),
        }
    }
}
