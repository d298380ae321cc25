use serde::Deserialize;

/// Patch of one user's attendance entry; absent fields keep their values.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateAttendanceEntryRequest {
    pub did_attend: Option<bool>,
    pub notes: Option<String>,
}
