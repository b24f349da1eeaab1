//! Upload DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use app_state::UploadOutcome;
use domain_claims::UploadRecord;

/// Query string of `POST /uploads`; the request body is the file itself
#[derive(Debug, Deserialize, Validate)]
pub struct UploadQuery {
    #[validate(length(min = 1, max = 255))]
    pub filename: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct HistoryQuery {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub record: UploadRecord,
    /// Records the upload endpoint reported as accepted
    pub accepted: u32,
    /// Parsed claims that were new to the store
    pub merged: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl From<UploadOutcome> for UploadResponse {
    fn from(outcome: UploadOutcome) -> Self {
        Self {
            accepted: outcome.result.count,
            errors: outcome.result.errors,
            record: outcome.record,
            merged: outcome.merged,
            warnings: outcome.warnings,
        }
    }
}
