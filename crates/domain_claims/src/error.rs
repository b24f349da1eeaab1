//! Claims triage domain errors

use thiserror::Error;

/// Errors raised by claim operations and value parsing
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(String),

    #[error("Unknown risk level: {0}")]
    InvalidRiskTier(String),

    #[error("Unknown claim status: {0}")]
    InvalidStatus(String),

    #[error("Unknown sort field: {0}")]
    InvalidSortField(String),

    #[error("Unknown sort direction: {0}")]
    InvalidSortDirection(String),

    #[error("Investigation note must not be empty")]
    EmptyNote,
}

/// Errors raised while checking or reading an uploaded claims file
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("Invalid file type. Please upload a CSV file.")]
    InvalidFileType { filename: String },

    #[error("File size exceeds {limit_mb}MB limit.")]
    FileTooLarge { size_bytes: u64, limit_mb: u64 },

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("CSV error: {0}")]
    Csv(String),
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        IngestError::Csv(err.to_string())
    }
}
