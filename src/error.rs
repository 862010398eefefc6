//! Error types for the attendance boundary
//!
//! The normalizer itself never fails; these errors belong to the layer that
//! obtains the raw payload and to configuration loading.

use thiserror::Error;

/// Errors that can occur around a single attendance query
#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("Student name is required to fetch attendance data")]
    EmptyStudentName,

    #[error("Cannot reach attendance service: {0}")]
    Transport(String),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AttendanceError {
    /// True for failures where the request never produced a response
    pub fn is_connectivity(&self) -> bool {
        matches!(self, AttendanceError::Transport(_))
    }
}

impl From<reqwest::Error> for AttendanceError {
    fn from(e: reqwest::Error) -> Self {
        AttendanceError::Transport(e.to_string())
    }
}
