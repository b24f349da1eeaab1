//! Audit, filter and dashboard DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_claims::{
    AuditAction, AuditFilter, ClaimError, ClaimStatus, FilterPatch,
    InvestigationSummary, RiskTier,
};

use crate::dto::claims::ClaimSummary;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct AuditQuery {
    /// Exact action label, e.g. `Status Change`
    pub action: Option<String>,
    #[validate(length(max = 100))]
    pub search: Option<String>,
}

impl From<AuditQuery> for AuditFilter {
    fn from(query: AuditQuery) -> Self {
        let mut filter = AuditFilter::default();
        if let Some(action) = query.action.filter(|a| !a.trim().is_empty()) {
            filter = filter.with_action(AuditAction::from(action));
        }
        if let Some(search) = query.search {
            filter = filter.with_search(search);
        }
        filter
    }
}

/// Body of `PUT /filters`
///
/// Absent fields are left as they are; an empty string clears the criterion.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateFiltersRequest {
    pub risk_tier: Option<String>,
    pub status: Option<String>,
    #[validate(length(max = 100))]
    pub search: Option<String>,
}

impl UpdateFiltersRequest {
    pub fn into_patch(self) -> Result<FilterPatch, ClaimError> {
        Ok(FilterPatch {
            risk_tier: self.risk_tier.map(|v| parse_or_clear::<RiskTier>(&v)).transpose()?,
            status: self.status.map(|v| parse_or_clear::<ClaimStatus>(&v)).transpose()?,
            search: self.search.map(|v| Some(v.trim().to_string())),
        })
    }
}

fn parse_or_clear<T>(value: &str) -> Result<Option<T>, ClaimError>
where
    T: std::str::FromStr<Err = ClaimError>,
{
    let value = value.trim();
    if value.is_empty() {
        Ok(None)
    } else {
        value.parse().map(Some)
    }
}

/// Which data a dashboard endpoint reads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// The statistics or graph feed
    #[default]
    Feed,
    /// Computed from the claims in the store
    Claims,
}

#[derive(Debug, Default, Deserialize)]
pub struct SourceQuery {
    #[serde(default)]
    pub source: Source,
}

#[derive(Debug, Serialize)]
pub struct InvestigationResponse {
    pub summary: InvestigationSummary,
    /// Claims needing investigation, highest fraud score first
    pub queue: Vec<ClaimSummary>,
}
