//! Port adapters for error-path tests

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, PortError};
use domain_claims::{
    AuditEntry, AuditPort, Claim, ClaimsPort, DashboardStats, GraphPort, RelationshipGraph,
    StatsPort, UploadRequest, UploadResult,
};

/// Every operation fails with `ServiceUnavailable`
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailablePorts;

impl UnavailablePorts {
    fn error(service: &str) -> PortError {
        PortError::unavailable(service)
    }
}

impl DomainPort for UnavailablePorts {}

#[async_trait]
impl ClaimsPort for UnavailablePorts {
    async fn fetch_claims(&self) -> Result<Vec<Claim>, PortError> {
        Err(Self::error("claims"))
    }

    async fn fetch_claim(&self, _id: &ClaimId) -> Result<Option<Claim>, PortError> {
        Err(Self::error("claims"))
    }

    async fn upload_claims(&self, _request: &UploadRequest) -> Result<UploadResult, PortError> {
        Err(Self::error("upload"))
    }
}

#[async_trait]
impl AuditPort for UnavailablePorts {
    async fn fetch_audit_log(&self) -> Result<Vec<AuditEntry>, PortError> {
        Err(Self::error("audit"))
    }
}

#[async_trait]
impl GraphPort for UnavailablePorts {
    async fn fetch_graph(&self) -> Result<RelationshipGraph, PortError> {
        Err(Self::error("graph"))
    }
}

#[async_trait]
impl StatsPort for UnavailablePorts {
    async fn fetch_dashboard_stats(&self) -> Result<DashboardStats, PortError> {
        Err(Self::error("stats"))
    }
}
