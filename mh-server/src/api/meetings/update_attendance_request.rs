use crate::AttendanceDto;

use serde::Deserialize;

/// Wholesale replacement of a meeting's attendance list.
#[derive(Debug, Deserialize)]
pub struct UpdateAttendanceRequest {
    pub attendance: Vec<AttendanceDto>,
}
