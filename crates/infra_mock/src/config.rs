//! Mock service configuration
//!
//! Loaded as the `mock` section of the API configuration, so every field can
//! be overridden from the environment (`API__MOCK__LATENCY__CLAIMS_MS=0`).

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::MockError;

/// Artificial delay per mock operation, in milliseconds
///
/// # Example
///
/// ```rust
/// use infra_mock::LatencyProfile;
///
/// let profile = LatencyProfile::default();
/// assert_eq!(profile.claims_ms, 800);
/// assert_eq!(LatencyProfile::none().upload_ms, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyProfile {
    pub claims_ms: u64,
    pub claim_ms: u64,
    pub upload_ms: u64,
    pub audit_ms: u64,
    pub graph_ms: u64,
    pub stats_ms: u64,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            claims_ms: 800,
            claim_ms: 500,
            upload_ms: 2000,
            audit_ms: 600,
            graph_ms: 1000,
            stats_ms: 700,
        }
    }
}

impl LatencyProfile {
    /// No delays at all
    pub fn none() -> Self {
        Self {
            claims_ms: 0,
            claim_ms: 0,
            upload_ms: 0,
            audit_ms: 0,
            graph_ms: 0,
            stats_ms: 0,
        }
    }
}

/// Sleeps for `ms` milliseconds; zero returns immediately
pub(crate) async fn simulate(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

/// Behaviour of the random upload outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadOutcomeConfig {
    /// Probability an upload is accepted
    pub success_rate: f64,
    /// Probability the canned row error is attached
    pub error_rate: f64,
    /// Accepted record count range, `min_count..max_count`
    pub min_count: u32,
    pub max_count: u32,
    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for UploadOutcomeConfig {
    fn default() -> Self {
        Self {
            success_rate: 0.9,
            error_rate: 0.2,
            min_count: 50,
            max_count: 150,
            seed: None,
        }
    }
}

/// Configuration for the whole mock service set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    pub latency: LatencyProfile,
    pub upload: UploadOutcomeConfig,
}

impl MockConfig {
    /// Zero latency, otherwise defaults
    pub fn instant() -> Self {
        Self {
            latency: LatencyProfile::none(),
            ..Self::default()
        }
    }

    /// Checks probabilities and the count range
    pub fn validate(&self) -> Result<(), MockError> {
        let probability = |name: &str, p: f64| {
            if (0.0..=1.0).contains(&p) {
                Ok(())
            } else {
                Err(MockError::InvalidConfig(format!(
                    "{} must be between 0 and 1, got {}",
                    name, p
                )))
            }
        };
        probability("upload.success_rate", self.upload.success_rate)?;
        probability("upload.error_rate", self.upload.error_rate)?;

        if self.upload.min_count >= self.upload.max_count {
            return Err(MockError::InvalidConfig(format!(
                "upload.min_count ({}) must be below upload.max_count ({})",
                self.upload.min_count, self.upload.max_count
            )));
        }
        Ok(())
    }
}
