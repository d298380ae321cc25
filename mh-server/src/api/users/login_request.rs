use serde::Deserialize;

/// Login body. The credential is kept as a raw JSON value so a wrong type
/// can be reported as a 400 with a useful message.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub credential: serde_json::Value,
}
