use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid permission: {value} {location}")]
    InvalidPermission {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid meeting kind: {value} {location}")]
    InvalidMeetingKind {
        value: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
