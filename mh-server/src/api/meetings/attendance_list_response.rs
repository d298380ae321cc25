use crate::AttendanceDto;

use serde::Serialize;

/// The full attendance list of one meeting. May be empty.
#[derive(Debug, Serialize)]
pub struct AttendanceListResponse {
    pub attendance: Vec<AttendanceDto>,
}
