//! Mock port adapters
//!
//! One adapter per port. All of them are cheap to clone and safe to share
//! behind `Arc<dyn ...>`.

mod audit;
mod claims;
mod graph;
mod stats;

pub use audit::MockAuditService;
pub use claims::MockClaimsService;
pub use graph::MockGraphService;
pub use stats::MockStatsService;

use std::sync::Arc;
use tracing::info;

use domain_claims::UploadOutcomeProvider;

use crate::config::MockConfig;
use crate::error::MockError;
use crate::outcome::RandomUploadOutcome;

/// The full set of mock services, loaded from fixtures
#[derive(Clone)]
pub struct MockServices {
    pub claims: Arc<MockClaimsService>,
    pub audit: Arc<MockAuditService>,
    pub graph: Arc<MockGraphService>,
    pub stats: Arc<MockStatsService>,
}

impl MockServices {
    /// Builds every service with a random upload outcome
    pub fn from_config(config: &MockConfig) -> Result<Self, MockError> {
        config.validate()?;
        let outcome = Arc::new(RandomUploadOutcome::new(config.upload.clone())?);
        Self::with_outcome(config, outcome)
    }

    /// Builds every service with the given upload outcome provider
    pub fn with_outcome(
        config: &MockConfig,
        outcome: Arc<dyn UploadOutcomeProvider>,
    ) -> Result<Self, MockError> {
        let latency = config.latency;
        let services = Self {
            claims: Arc::new(MockClaimsService::from_fixtures(latency, outcome)?),
            audit: Arc::new(MockAuditService::from_fixtures(latency)?),
            graph: Arc::new(MockGraphService::from_fixtures(latency)?),
            stats: Arc::new(MockStatsService::new(latency)),
        };
        info!(
            claims = services.claims.len(),
            claims_ms = latency.claims_ms,
            upload_ms = latency.upload_ms,
            "Loaded mock services"
        );
        Ok(services)
    }
}
