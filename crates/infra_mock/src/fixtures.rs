//! Embedded fixture data
//!
//! The JSON files under `fixtures/` are compiled into the binary and decoded
//! on demand.

use chrono::NaiveDate;

use domain_claims::{AuditEntry, Claim, DashboardStats, RelationshipGraph, RiskBucket, TrendPoint};

use crate::error::MockError;

const CLAIMS_JSON: &str = include_str!("../fixtures/claims.json");
const AUDIT_JSON: &str = include_str!("../fixtures/audit.json");
const GRAPH_JSON: &str = include_str!("../fixtures/graph.json");

/// The sample claim collection
pub fn claims() -> Result<Vec<Claim>, MockError> {
    serde_json::from_str(CLAIMS_JSON).map_err(|e| MockError::fixture("claims.json", e))
}

/// The sample server-side audit log
pub fn audit_log() -> Result<Vec<AuditEntry>, MockError> {
    serde_json::from_str(AUDIT_JSON).map_err(|e| MockError::fixture("audit.json", e))
}

/// The sample relationship graph
pub fn graph() -> Result<RelationshipGraph, MockError> {
    serde_json::from_str(GRAPH_JSON).map_err(|e| MockError::fixture("graph.json", e))
}

/// Fixed headline figures served by the statistics feed
///
/// Not derived from the claim fixtures.
pub fn dashboard_stats() -> DashboardStats {
    let bucket = |name: &str, value| RiskBucket {
        name: name.to_string(),
        value,
    };
    let point = |day, count, flagged| TrendPoint {
        date: NaiveDate::from_ymd_opt(2024, 11, day).unwrap_or_default(),
        count,
        flagged,
    };

    DashboardStats {
        total_claims: 150,
        flagged_claims: 42,
        high_risk_claims: 18,
        avg_fraud_score: 0.38,
        risk_distribution: vec![bucket("Low", 85), bucket("Medium", 47), bucket("High", 18)],
        trends: vec![
            point(1, 12, 3),
            point(5, 18, 5),
            point(10, 25, 8),
            point(15, 30, 12),
            point(20, 35, 14),
        ],
    }
}
