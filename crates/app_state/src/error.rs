//! Application workflow errors

use thiserror::Error;

use core_kernel::{ClaimId, PortError};
use domain_claims::{ClaimError, IngestError};

/// Errors raised by record store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(ClaimId),

    #[error(transparent)]
    Claim(#[from] ClaimError),
}

/// Errors raised by triage, audit and dashboard workflows
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Port(#[from] PortError),
}

impl WorkflowError {
    pub fn is_not_found(&self) -> bool {
        match self {
            WorkflowError::Store(StoreError::ClaimNotFound(_)) => true,
            WorkflowError::Port(e) => e.is_not_found(),
            _ => false,
        }
    }
}

/// Errors raised by the upload workflow
#[derive(Debug, Error)]
pub enum UploadError {
    /// Wrong file type or too large; nothing was recorded
    #[error(transparent)]
    InvalidFile(#[from] IngestError),

    /// The file failed CSV validation; nothing was recorded
    #[error("CSV validation failed: {}", .0.join(", "))]
    InvalidCsv(Vec<String>),

    /// The upload endpoint refused the file; a failed history entry was recorded
    #[error("Upload failed: {}", .0.join(", "))]
    Rejected(Vec<String>),

    /// The upload endpoint could not be reached; a failed history entry was recorded
    #[error("Upload failed due to an unexpected error: {0}")]
    Port(#[from] PortError),
}

impl UploadError {
    /// Returns true if the file never reached the upload endpoint
    pub fn is_validation(&self) -> bool {
        matches!(self, UploadError::InvalidFile(_) | UploadError::InvalidCsv(_))
    }
}
