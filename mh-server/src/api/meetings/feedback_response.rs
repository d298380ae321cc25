use crate::FeedbackDto;

use serde::Serialize;

/// One user's feedback; null when the user left none.
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub feedback: Option<FeedbackDto>,
}
