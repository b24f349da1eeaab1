//! Claims Triage Domain
//!
//! This crate holds the claim record and everything the fraud triage
//! dashboard computes from it.
//!
//! # Data Flow
//!
//! ```text
//! CSV file ──> ingest ──┐
//!                       ├──> Vec<Claim> ──> query::transform ──> visible page
//! claims feed (port) ───┘
//! ```
//!
//! Risk tiers are always derived from the fraud score (strict thresholds at
//! 0.4 and 0.7) and never stored.

pub mod claim;
pub mod risk;
pub mod query;
pub mod ingest;
pub mod audit;
pub mod notes;
pub mod upload;
pub mod graph;
pub mod stats;
pub mod privacy;
pub mod ports;
pub mod error;

pub use claim::{Claim, ClaimDetail, ClaimKind, ClaimStatus};
pub use risk::RiskTier;
pub use query::{
    transform, paginate, ClaimFilter, ClaimPage, FilterPatch, Page, PageRequest,
    SortDirection, SortField, SortSpec, PAGE_SIZE,
};
pub use ingest::{validate_and_parse, validate_headers, IngestReport};
pub use audit::{AuditAction, AuditEntry, AuditFilter, NewAuditEntry};
pub use notes::{InvestigationNote, NewNote};
pub use upload::{UploadRecord, UploadRequest, UploadResult, UploadStatus};
pub use graph::{GraphEdge, GraphNode, NodeType, RelationshipGraph};
pub use stats::{DashboardStats, InvestigationSummary, RiskBucket, TrendPoint};
pub use ports::{AuditPort, ClaimsPort, GraphPort, StatsPort, UploadOutcomeProvider};
pub use error::{ClaimError, IngestError};
