//! Service ports for the triage dashboard
//!
//! Each data source the dashboard depends on is a trait here. Adapters in
//! `infra_mock` serve fixture data; a real backend would implement the same
//! traits.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::ports::ClaimsPort;
//! use std::sync::Arc;
//!
//! pub struct ClaimsListView {
//!     claims: Arc<dyn ClaimsPort>,
//! }
//!
//! let rows = view.claims.fetch_claims().await?;
//! ```

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, PortError};

use crate::audit::AuditEntry;
use crate::claim::Claim;
use crate::graph::RelationshipGraph;
use crate::stats::DashboardStats;
use crate::upload::{UploadRequest, UploadResult};

/// Claims feed and upload endpoint
#[async_trait]
pub trait ClaimsPort: DomainPort {
    /// Fetches every claim
    async fn fetch_claims(&self) -> Result<Vec<Claim>, PortError>;

    /// Fetches a single claim; `Ok(None)` if unknown
    async fn fetch_claim(&self, id: &ClaimId) -> Result<Option<Claim>, PortError>;

    /// Submits a validated file for processing
    async fn upload_claims(&self, request: &UploadRequest) -> Result<UploadResult, PortError>;
}

/// Server-side audit log
#[async_trait]
pub trait AuditPort: DomainPort {
    async fn fetch_audit_log(&self) -> Result<Vec<AuditEntry>, PortError>;
}

/// Relationship graph feed
#[async_trait]
pub trait GraphPort: DomainPort {
    async fn fetch_graph(&self) -> Result<RelationshipGraph, PortError>;
}

/// Dashboard statistics feed
#[async_trait]
pub trait StatsPort: DomainPort {
    async fn fetch_dashboard_stats(&self) -> Result<DashboardStats, PortError>;
}

/// Decides how the upload endpoint responds
///
/// Lets tests pin upload outcomes instead of depending on randomness.
pub trait UploadOutcomeProvider: Send + Sync {
    fn next_outcome(&self, request: &UploadRequest) -> UploadResult;
}
