//! Attendance entries embedded in a meeting.

use crate::{CoreError, Result as CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

pub const FEEDBACK_RATING_MIN: i64 = 1;
pub const FEEDBACK_RATING_MAX: i64 = 5;

/// One invited user's attendance record for a meeting.
///
/// Entries have no identity of their own; a meeting owns its list
/// exclusively and holds at most one entry per user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub user: String,
    pub did_attend: bool,
    pub notes: String,
    pub feedback_rating: Option<i64>,
    pub feedback_description: Option<String>,
}

impl AttendanceEntry {
    pub fn new(user: String) -> Self {
        Self {
            user,
            did_attend: false,
            notes: String::new(),
            feedback_rating: None,
            feedback_description: None,
        }
    }

    /// feedback_rating, when present, must lie in [1,5].
    #[track_caller]
    pub fn validate(&self) -> CoreResult<()> {
        if self.user.is_empty() {
            return Err(CoreError::Validation {
                message: "attendance entry is missing the user id".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Some(rating) = self.feedback_rating
            && !(FEEDBACK_RATING_MIN..=FEEDBACK_RATING_MAX).contains(&rating)
        {
            return Err(CoreError::Validation {
                message: format!(
                    "feedback rating must be between {} and {}, got {}",
                    FEEDBACK_RATING_MIN, FEEDBACK_RATING_MAX, rating
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
