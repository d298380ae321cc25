use serde::Deserialize;

/// Rating in [1,5] plus an optional description.
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub feedback_rating: Option<i64>,
    pub feedback_description: Option<String>,
}
