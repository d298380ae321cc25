use crate::MeetingDto;

use serde::Serialize;

/// Single meeting response
#[derive(Debug, Serialize)]
pub struct MeetingResponse {
    pub meeting: MeetingDto,
}
