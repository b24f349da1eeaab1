//! Mock audit log

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_claims::{AuditEntry, AuditPort};

use crate::config::{simulate, LatencyProfile};
use crate::error::MockError;
use crate::fixtures;

#[derive(Clone)]
pub struct MockAuditService {
    entries: Arc<Vec<AuditEntry>>,
    latency: LatencyProfile,
}

impl MockAuditService {
    pub fn new(entries: Vec<AuditEntry>, latency: LatencyProfile) -> Self {
        Self {
            entries: Arc::new(entries),
            latency,
        }
    }

    pub fn from_fixtures(latency: LatencyProfile) -> Result<Self, MockError> {
        Ok(Self::new(fixtures::audit_log()?, latency))
    }
}

impl DomainPort for MockAuditService {}

#[async_trait]
impl HealthCheckable for MockAuditService {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy("mock-audit-service")
    }
}

#[async_trait]
impl AuditPort for MockAuditService {
    #[instrument(skip(self))]
    async fn fetch_audit_log(&self) -> Result<Vec<AuditEntry>, PortError> {
        simulate(self.latency.audit_ms).await;
        Ok(self.entries.as_ref().clone())
    }
}
