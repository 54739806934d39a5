use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeeError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid fee configuration: {field} — {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Preference store error: {0}")]
    PreferenceError(String),
}

impl From<serde_json::Error> for FeeError {
    fn from(e: serde_json::Error) -> Self {
        FeeError::SerializationError(e.to_string())
    }
}
