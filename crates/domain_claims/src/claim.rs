//! Claim record
//!
//! A single claim shape covers every source: fields common to all claims live
//! on [`Claim`], sub-type specific fields live in the tagged [`ClaimDetail`]
//! variant (`kind: inpatient | outpatient | generic`).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClaimId, PatientId, ProviderId};
use crate::error::ClaimError;
use crate::risk::RiskTier;

/// Workflow status of a claim under triage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    /// Not yet looked at
    #[default]
    Pending,
    /// Looked at, no decision recorded
    Reviewed,
    /// Marked for investigation
    Suspicious,
    /// Investigated and cleared
    Cleared,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Reviewed => "reviewed",
            ClaimStatus::Suspicious => "suspicious",
            ClaimStatus::Cleared => "cleared",
        }
    }

    pub fn all() -> [ClaimStatus; 4] {
        [
            ClaimStatus::Pending,
            ClaimStatus::Reviewed,
            ClaimStatus::Suspicious,
            ClaimStatus::Cleared,
        ]
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(ClaimStatus::Pending),
            "reviewed" => Ok(ClaimStatus::Reviewed),
            "suspicious" => Ok(ClaimStatus::Suspicious),
            "cleared" => Ok(ClaimStatus::Cleared),
            _ => Err(ClaimError::InvalidStatus(s.to_string())),
        }
    }
}

/// Claim sub-type discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimKind {
    Inpatient,
    Outpatient,
    Generic,
}

impl ClaimKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimKind::Inpatient => "inpatient",
            ClaimKind::Outpatient => "outpatient",
            ClaimKind::Generic => "generic",
        }
    }
}

impl fmt::Display for ClaimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-type specific claim fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClaimDetail {
    /// Hospital stay
    Inpatient {
        #[serde(default)]
        admission_date: Option<NaiveDate>,
        #[serde(default)]
        discharge_date: Option<NaiveDate>,
        #[serde(default)]
        diagnosis_related_group: Option<String>,
    },
    /// Visit without admission
    Outpatient {
        #[serde(default)]
        service_date: Option<NaiveDate>,
    },
    /// Source carried neither admission nor service dates
    Generic,
}

impl ClaimDetail {
    pub fn kind(&self) -> ClaimKind {
        match self {
            ClaimDetail::Inpatient { .. } => ClaimKind::Inpatient,
            ClaimDetail::Outpatient { .. } => ClaimKind::Outpatient,
            ClaimDetail::Generic => ClaimKind::Generic,
        }
    }
}

fn default_procedures() -> u32 {
    1
}

/// A claim under fraud triage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Claim identifier
    pub id: ClaimId,
    /// Patient reference
    pub patient_id: PatientId,
    /// Provider reference
    pub provider_id: ProviderId,
    /// Attending physician
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
    /// Date the claim starts
    pub claim_date: NaiveDate,
    /// Total claimed amount
    pub amount: Decimal,
    /// Primary procedure code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procedure_code: Option<String>,
    /// Primary diagnosis code (ICD-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis_code: Option<String>,
    #[serde(default = "default_procedures")]
    pub number_of_procedures: u32,
    /// Estimated fraud likelihood in [0, 1]
    pub fraud_score: f64,
    #[serde(default)]
    pub status: ClaimStatus,
    /// Free-text flags raised against the claim
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(flatten)]
    pub detail: ClaimDetail,
}

impl Claim {
    /// Creates a pending claim with a zero fraud score and no flags
    pub fn new(
        id: impl Into<ClaimId>,
        patient_id: impl Into<PatientId>,
        provider_id: impl Into<ProviderId>,
        claim_date: NaiveDate,
        amount: Decimal,
        detail: ClaimDetail,
    ) -> Self {
        Self {
            id: id.into(),
            patient_id: patient_id.into(),
            provider_id: provider_id.into(),
            doctor_name: None,
            claim_date,
            amount,
            procedure_code: None,
            diagnosis_code: None,
            number_of_procedures: default_procedures(),
            fraud_score: 0.0,
            status: ClaimStatus::Pending,
            flags: Vec::new(),
            detail,
        }
    }

    /// Sets the fraud score, clamped into [0, 1]; NaN becomes 0
    pub fn with_fraud_score(mut self, score: f64) -> Self {
        self.fraud_score = normalize_score(score);
        self
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_diagnosis(mut self, code: impl Into<String>) -> Self {
        self.diagnosis_code = Some(code.into());
        self
    }

    pub fn with_procedure(mut self, code: impl Into<String>) -> Self {
        self.procedure_code = Some(code.into());
        self
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }

    /// Risk tier derived from the fraud score
    pub fn risk_tier(&self) -> RiskTier {
        RiskTier::from_score(self.fraud_score)
    }

    pub fn kind(&self) -> ClaimKind {
        self.detail.kind()
    }

    /// Returns true if any flag has been raised
    pub fn is_flagged(&self) -> bool {
        !self.flags.is_empty()
    }

    /// Suspicious for investigation purposes: marked suspicious or high risk
    pub fn needs_investigation(&self) -> bool {
        self.status == ClaimStatus::Suspicious || self.risk_tier() == RiskTier::High
    }

    /// Days between admission and discharge for inpatient claims
    pub fn length_of_stay(&self) -> Option<i64> {
        match &self.detail {
            ClaimDetail::Inpatient {
                admission_date: Some(admitted),
                discharge_date: Some(discharged),
                ..
            } => Some((*discharged - *admitted).num_days()),
            _ => None,
        }
    }

    /// Case-insensitive substring match against id and diagnosis code
    ///
    /// `needle` must already be lowercase.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.id.as_str().to_lowercase().contains(needle)
            || self
                .diagnosis_code
                .as_deref()
                .map(|d| d.to_lowercase().contains(needle))
                .unwrap_or(false)
    }
}

pub(crate) fn normalize_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> Claim {
        Claim::new(
            "CLM-2024-001",
            "PAT-1234567",
            "PRV-5678",
            NaiveDate::from_ymd_opt(2024, 11, 20).unwrap(),
            dec!(500.00),
            ClaimDetail::Outpatient { service_date: None },
        )
    }

    #[test]
    fn test_new_claim_defaults() {
        let claim = sample();
        assert_eq!(claim.status, ClaimStatus::Pending);
        assert_eq!(claim.number_of_procedures, 1);
        assert_eq!(claim.risk_tier(), RiskTier::Low);
        assert!(!claim.is_flagged());
    }

    #[test]
    fn test_fraud_score_is_clamped() {
        assert_eq!(sample().with_fraud_score(1.7).fraud_score, 1.0);
        assert_eq!(sample().with_fraud_score(-0.2).fraud_score, 0.0);
        assert_eq!(sample().with_fraud_score(f64::NAN).fraud_score, 0.0);
    }

    #[test]
    fn test_serde_uses_kind_tag() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["kind"], "outpatient");
        assert_eq!(json["status"], "pending");
    }

    #[test]
    fn test_length_of_stay() {
        let mut claim = sample();
        claim.detail = ClaimDetail::Inpatient {
            admission_date: NaiveDate::from_ymd_opt(2024, 11, 1),
            discharge_date: NaiveDate::from_ymd_opt(2024, 11, 6),
            diagnosis_related_group: None,
        };
        assert_eq!(claim.length_of_stay(), Some(5));
        assert_eq!(sample().length_of_stay(), None);
    }
}
