//! Upload history and backend upload outcomes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::UploadId;

/// State of an upload in the history list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Success,
    Failed,
    Processing,
}

/// One row of the upload history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: UploadId,
    pub filename: String,
    pub upload_date: DateTime<Utc>,
    pub record_count: u32,
    pub status: UploadStatus,
}

impl UploadRecord {
    pub fn succeeded(filename: impl Into<String>, upload_date: DateTime<Utc>, record_count: u32) -> Self {
        Self {
            id: UploadId::generate(),
            filename: filename.into(),
            upload_date,
            record_count,
            status: UploadStatus::Success,
        }
    }

    /// Failed uploads always record zero claims
    pub fn failed(filename: impl Into<String>, upload_date: DateTime<Utc>) -> Self {
        Self {
            id: UploadId::generate(),
            filename: filename.into(),
            upload_date,
            record_count: 0,
            status: UploadStatus::Failed,
        }
    }
}

/// What the upload endpoint is asked to accept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub filename: String,
    pub row_count: usize,
}

/// What the upload endpoint reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub success: bool,
    /// Records the backend says it accepted
    pub count: u32,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl UploadResult {
    pub fn accepted(count: u32) -> Self {
        Self {
            success: true,
            count,
            errors: Vec::new(),
        }
    }

    pub fn rejected(errors: Vec<String>) -> Self {
        Self {
            success: false,
            count: 0,
            errors,
        }
    }
}
