//! Mock service error types

use thiserror::Error;

use core_kernel::PortError;

/// Errors raised while setting up mock services
#[derive(Debug, Error)]
pub enum MockError {
    /// An embedded fixture could not be decoded
    #[error("Failed to decode fixture '{name}': {message}")]
    FixtureDecode { name: &'static str, message: String },

    /// Configuration values are out of range
    #[error("Invalid mock configuration: {0}")]
    InvalidConfig(String),
}

impl MockError {
    pub fn fixture(name: &'static str, err: serde_json::Error) -> Self {
        MockError::FixtureDecode {
            name,
            message: err.to_string(),
        }
    }
}

impl From<MockError> for PortError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::FixtureDecode { .. } => PortError::transformation(err.to_string()),
            MockError::InvalidConfig(message) => PortError::validation(message),
        }
    }
}
