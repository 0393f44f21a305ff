//! Error types for overlap-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OverlapError {
    #[error("Participant name is empty")]
    EmptyParticipant,

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Invalid time (expected HH:MM): {0}")]
    InvalidTime(String),

    /// Start is not strictly before end.
    #[error("Empty time range: {start}-{end}")]
    EmptyRange { start: String, end: String },

    /// The records payload was not valid JSON or had the wrong shape.
    #[error("Invalid availability JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for OverlapError {
    fn from(err: serde_json::Error) -> Self {
        OverlapError::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OverlapError>;
