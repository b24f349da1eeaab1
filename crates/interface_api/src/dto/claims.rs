//! Claims DTOs
//!
//! Patient and provider references are masked in every claim response.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_claims::privacy::{mask_patient_id, mask_provider_id};
use domain_claims::{
    Claim, ClaimDetail, ClaimError, ClaimFilter, ClaimKind, ClaimStatus, RiskTier, SortDirection,
    SortField, SortSpec,
};

use crate::dto::notes::NoteResponse;

/// Query string of `GET /claims`
///
/// Filter parameters given here apply to this request only and take
/// precedence over the saved filters.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ClaimListQuery {
    pub risk: Option<String>,
    pub status: Option<String>,
    #[validate(length(max = 100))]
    pub search: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    #[validate(range(min = 1))]
    pub page: Option<usize>,
}

impl ClaimListQuery {
    /// Saved filters overridden by whatever this query sets
    pub fn filter_over(&self, saved: ClaimFilter) -> Result<ClaimFilter, ClaimError> {
        let mut filter = saved;
        if let Some(risk) = non_blank(&self.risk) {
            filter.risk_tier = Some(risk.parse::<RiskTier>()?);
        }
        if let Some(status) = non_blank(&self.status) {
            filter.status = Some(status.parse::<ClaimStatus>()?);
        }
        if let Some(search) = non_blank(&self.search) {
            filter = filter.with_search(search);
        }
        Ok(filter)
    }

    /// Requested sort; the field defaults to claim date and the direction
    /// to descending for dates, ascending otherwise
    pub fn sort_spec(&self) -> Result<SortSpec, ClaimError> {
        let field = match non_blank(&self.sort) {
            Some(field) => field.parse::<SortField>()?,
            None => return Ok(match non_blank(&self.direction) {
                Some(direction) => SortSpec::new(SortField::ClaimDate, direction.parse()?),
                None => SortSpec::default(),
            }),
        };
        let direction = match non_blank(&self.direction) {
            Some(direction) => direction.parse::<SortDirection>()?,
            None => SortDirection::Asc,
        };
        Ok(SortSpec::new(field, direction))
    }

    pub fn page(&self) -> usize {
        self.page.unwrap_or(1)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// One row of the claims table
#[derive(Debug, Clone, Serialize)]
pub struct ClaimSummary {
    pub id: String,
    pub patient_id: String,
    pub provider_id: String,
    pub claim_date: NaiveDate,
    pub amount: Decimal,
    pub fraud_score: f64,
    pub risk_tier: RiskTier,
    pub status: ClaimStatus,
    pub kind: ClaimKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis_code: Option<String>,
    pub flags: Vec<String>,
}

impl From<&Claim> for ClaimSummary {
    fn from(claim: &Claim) -> Self {
        Self {
            id: claim.id.to_string(),
            patient_id: mask_patient_id(claim.patient_id.as_str()),
            provider_id: mask_provider_id(claim.provider_id.as_str()),
            claim_date: claim.claim_date,
            amount: claim.amount,
            fraud_score: claim.fraud_score,
            risk_tier: claim.risk_tier(),
            status: claim.status,
            kind: claim.kind(),
            diagnosis_code: claim.diagnosis_code.clone(),
            flags: claim.flags.clone(),
        }
    }
}

impl From<Claim> for ClaimSummary {
    fn from(claim: Claim) -> Self {
        Self::from(&claim)
    }
}

/// Claim detail view with its investigation notes
#[derive(Debug, Clone, Serialize)]
pub struct ClaimDetailResponse {
    #[serde(flatten)]
    pub summary: ClaimSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub procedure_code: Option<String>,
    pub number_of_procedures: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_of_stay: Option<i64>,
    pub detail: ClaimDetail,
    pub notes: Vec<NoteResponse>,
}

impl ClaimDetailResponse {
    pub fn new(claim: &Claim, notes: Vec<NoteResponse>) -> Self {
        Self {
            summary: ClaimSummary::from(claim),
            doctor_name: claim.doctor_name.clone(),
            procedure_code: claim.procedure_code.clone(),
            number_of_procedures: claim.number_of_procedures,
            length_of_stay: claim.length_of_stay(),
            detail: claim.detail.clone(),
            notes,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1))]
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct StatusChangeResponse {
    pub previous: ClaimStatus,
    pub claim: ClaimSummary,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// False when a newer refresh overtook this one
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}
