use crate::AttendanceDto;

use serde::Serialize;

/// One user's attendance entry; null when the user has none.
#[derive(Debug, Serialize)]
pub struct AttendanceResponse {
    pub attendance: Option<AttendanceDto>,
}
