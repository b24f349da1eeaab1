//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use app_state::{StoreError, UploadError, WorkflowError};
use core_kernel::PortError;
use domain_claims::{ClaimError, IngestError};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {message}")]
    Validation { message: String, details: Vec<String> },

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("Upload rejected")]
    UploadRejected(Vec<String>),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Validation { message, details } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                message,
                Some(details).filter(|d| !d.is_empty()),
            ),
            ApiError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large", msg, None)
            }
            ApiError::UploadRejected(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "upload_rejected",
                format!("Upload failed: {}", errors.join(", ")),
                Some(errors),
            ),
            ApiError::Unavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg, None)
            }
            ApiError::Internal(msg) => {
                error!(message = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg, None)
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            PortError::Validation { message } => ApiError::BadRequest(message),
            _ if err.is_transient() => ApiError::Unavailable(err.to_string()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::ClaimNotFound(_) => ApiError::NotFound(err.to_string()),
            ClaimError::EmptyNote => ApiError::validation(err.to_string()),
            ClaimError::InvalidRiskTier(_)
            | ClaimError::InvalidStatus(_)
            | ClaimError::InvalidSortField(_)
            | ClaimError::InvalidSortDirection(_) => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ClaimNotFound(_) => ApiError::NotFound(err.to_string()),
            StoreError::Claim(e) => e.into(),
        }
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Store(e) => e.into(),
            WorkflowError::Port(e) => e.into(),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::InvalidFile(e @ IngestError::FileTooLarge { .. }) => {
                ApiError::PayloadTooLarge(e.to_string())
            }
            UploadError::InvalidFile(e) => ApiError::BadRequest(e.to_string()),
            UploadError::InvalidCsv(details) => ApiError::Validation {
                message: "CSV validation failed".to_string(),
                details,
            },
            UploadError::Rejected(errors) => ApiError::UploadRejected(errors),
            UploadError::Port(e) => e.into(),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => format!("{}: {}", field, message),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();
        details.sort();
        ApiError::Validation {
            message: "Invalid request".to_string(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::ClaimId;

    fn status(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status(PortError::not_found("Claim", "CLM-1")), StatusCode::NOT_FOUND);
        assert_eq!(status(PortError::unavailable("claims")), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            status(StoreError::ClaimNotFound(ClaimId::new("CLM-1"))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status(ClaimError::EmptyNote), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            status(ClaimError::InvalidStatus("approved".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_only_transient_port_errors_are_unavailable() {
        assert_eq!(
            status(PortError::transformation("claims.json: expected array")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status(PortError::internal("boom")), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status(PortError::validation("bad id")), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upload_error_mapping() {
        assert_eq!(
            status(UploadError::InvalidFile(IngestError::FileTooLarge {
                size_bytes: 20,
                limit_mb: 10
            })),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            status(UploadError::InvalidFile(IngestError::InvalidFileType {
                filename: "a.txt".into()
            })),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(UploadError::Rejected(vec!["Row 3".into()])),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
