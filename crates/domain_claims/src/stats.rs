//! Dashboard and investigation statistics

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::claim::{Claim, ClaimStatus};
use crate::notes::InvestigationNote;
use crate::risk::RiskTier;

/// Named count for the risk distribution chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskBucket {
    pub name: String,
    pub value: u64,
}

/// Per-day volume for the trend chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub count: u64,
    pub flagged: u64,
}

/// Headline figures for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_claims: u64,
    pub flagged_claims: u64,
    pub high_risk_claims: u64,
    pub avg_fraud_score: f64,
    pub risk_distribution: Vec<RiskBucket>,
    pub trends: Vec<TrendPoint>,
}

impl DashboardStats {
    /// Derives dashboard figures from a claim collection
    ///
    /// A claim counts as flagged when it carries any flag or is marked
    /// suspicious. Trends are grouped per claim date, oldest first.
    pub fn from_claims(claims: &[Claim]) -> Self {
        let is_flagged = |c: &Claim| c.is_flagged() || c.status == ClaimStatus::Suspicious;

        let mut tiers: BTreeMap<RiskTier, u64> = RiskTier::all().into_iter().map(|t| (t, 0)).collect();
        let mut trends: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
        let mut flagged = 0u64;
        let mut score_sum = 0.0;

        for claim in claims {
            *tiers.entry(claim.risk_tier()).or_default() += 1;
            let day = trends.entry(claim.claim_date).or_default();
            day.0 += 1;
            if is_flagged(claim) {
                flagged += 1;
                day.1 += 1;
            }
            score_sum += claim.fraud_score;
        }

        let avg_fraud_score = if claims.is_empty() {
            0.0
        } else {
            // two decimals, as displayed
            (score_sum / claims.len() as f64 * 100.0).round() / 100.0
        };

        Self {
            total_claims: claims.len() as u64,
            flagged_claims: flagged,
            high_risk_claims: tiers.get(&RiskTier::High).copied().unwrap_or(0),
            avg_fraud_score,
            risk_distribution: tiers
                .into_iter()
                .map(|(tier, value)| RiskBucket {
                    name: tier.label().to_string(),
                    value,
                })
                .collect(),
            trends: trends
                .into_iter()
                .map(|(date, (count, flagged))| TrendPoint { date, count, flagged })
                .collect(),
        }
    }
}

/// Counters shown on the investigation page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvestigationSummary {
    /// Marked suspicious or high risk
    pub suspicious: usize,
    pub reviewed: usize,
    pub cleared: usize,
    pub notes: usize,
}

impl InvestigationSummary {
    pub fn compute(claims: &[Claim], notes: &[InvestigationNote]) -> Self {
        let count = |status: ClaimStatus| claims.iter().filter(|c| c.status == status).count();
        Self {
            suspicious: claims.iter().filter(|c| c.needs_investigation()).count(),
            reviewed: count(ClaimStatus::Reviewed),
            cleared: count(ClaimStatus::Cleared),
            notes: notes.len(),
        }
    }
}

/// Claims needing investigation, highest fraud score first
pub fn investigation_queue(claims: &[Claim]) -> Vec<&Claim> {
    let mut queue: Vec<&Claim> = claims.iter().filter(|c| c.needs_investigation()).collect();
    queue.sort_by(|a, b| b.fraud_score.total_cmp(&a.fraud_score).then_with(|| a.id.cmp(&b.id)));
    queue
}
