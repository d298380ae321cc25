use crate::AttendanceDto;

use serde::Serialize;

/// Every attendance entry that carries feedback, identity preserved.
#[derive(Debug, Serialize)]
pub struct FeedbackListResponse {
    pub feedback: Vec<AttendanceDto>,
}
