//! Mock claims feed and upload endpoint

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

use core_kernel::{ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_claims::{Claim, ClaimsPort, UploadOutcomeProvider, UploadRequest, UploadResult};

use crate::config::{simulate, LatencyProfile};
use crate::error::MockError;
use crate::fixtures;

/// Serves a fixed claim collection
///
/// Uploads never change what `fetch_claims` returns; merging uploaded rows
/// is the store's job.
#[derive(Clone)]
pub struct MockClaimsService {
    claims: Arc<Vec<Claim>>,
    latency: LatencyProfile,
    outcome: Arc<dyn UploadOutcomeProvider>,
}

impl MockClaimsService {
    pub fn new(
        claims: Vec<Claim>,
        latency: LatencyProfile,
        outcome: Arc<dyn UploadOutcomeProvider>,
    ) -> Self {
        Self {
            claims: Arc::new(claims),
            latency,
            outcome,
        }
    }

    /// Loads the embedded claim fixtures
    pub fn from_fixtures(
        latency: LatencyProfile,
        outcome: Arc<dyn UploadOutcomeProvider>,
    ) -> Result<Self, MockError> {
        Ok(Self::new(fixtures::claims()?, latency, outcome))
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

impl DomainPort for MockClaimsService {}

#[async_trait]
impl HealthCheckable for MockClaimsService {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy("mock-claims-service")
    }
}

#[async_trait]
impl ClaimsPort for MockClaimsService {
    #[instrument(skip(self))]
    async fn fetch_claims(&self) -> Result<Vec<Claim>, PortError> {
        simulate(self.latency.claims_ms).await;
        debug!(count = self.claims.len(), "Served claims");
        Ok(self.claims.as_ref().clone())
    }

    #[instrument(skip(self, id), fields(claim_id = %id))]
    async fn fetch_claim(&self, id: &ClaimId) -> Result<Option<Claim>, PortError> {
        simulate(self.latency.claim_ms).await;
        Ok(self.claims.iter().find(|c| &c.id == id).cloned())
    }

    #[instrument(skip(self, request), fields(filename = %request.filename, rows = request.row_count))]
    async fn upload_claims(&self, request: &UploadRequest) -> Result<UploadResult, PortError> {
        simulate(self.latency.upload_ms).await;
        Ok(self.outcome.next_outcome(request))
    }
}
