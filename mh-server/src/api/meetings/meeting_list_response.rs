use crate::MeetingDto;

use serde::Serialize;

/// Paginated meeting listing with page metadata
#[derive(Debug, Serialize)]
pub struct MeetingListResponse {
    pub meetings: Vec<MeetingDto>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}
