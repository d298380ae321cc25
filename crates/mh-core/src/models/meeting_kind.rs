use crate::{CoreError, Result as CoreResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MeetingKind {
    Meeting,
    Event,
}

impl MeetingKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Meeting => "meeting",
            Self::Event => "event",
        }
    }
}

impl FromStr for MeetingKind {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "meeting" => Ok(Self::Meeting),
            "event" => Ok(Self::Event),
            _ => Err(CoreError::InvalidMeetingKind {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
