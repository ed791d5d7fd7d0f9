use thiserror::Error;

#[derive(Debug, Error)]
pub enum CustomsError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Missing reference data: {0}")]
    MissingReferenceData(String),

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CustomsError {
    fn from(e: serde_json::Error) -> Self {
        CustomsError::SerializationError(e.to_string())
    }
}
