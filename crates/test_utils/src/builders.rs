//! Test Data Builders
//!
//! Lets tests specify only the fields they care about.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_claims::{Claim, ClaimDetail, ClaimStatus};

use crate::fixtures::TemporalFixtures;

/// Builder for [`Claim`] values
pub struct ClaimBuilder {
    id: String,
    patient_id: String,
    provider_id: String,
    claim_date: NaiveDate,
    amount: Decimal,
    fraud_score: f64,
    status: ClaimStatus,
    diagnosis_code: Option<String>,
    procedure_code: Option<String>,
    flags: Vec<String>,
    detail: ClaimDetail,
}

impl ClaimBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            patient_id: "PAT-0001".to_string(),
            provider_id: "PRV-0001".to_string(),
            claim_date: TemporalFixtures::november(20),
            amount: dec!(500.00),
            fraud_score: 0.1,
            status: ClaimStatus::Pending,
            diagnosis_code: Some("I10".to_string()),
            procedure_code: Some("99213".to_string()),
            flags: Vec::new(),
            detail: ClaimDetail::Outpatient {
                service_date: Some(TemporalFixtures::november(20)),
            },
        }
    }

    pub fn patient(mut self, id: impl Into<String>) -> Self {
        self.patient_id = id.into();
        self
    }

    pub fn provider(mut self, id: impl Into<String>) -> Self {
        self.provider_id = id.into();
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.claim_date = date;
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.fraud_score = score;
        self
    }

    pub fn status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    pub fn diagnosis(mut self, code: impl Into<String>) -> Self {
        self.diagnosis_code = Some(code.into());
        self
    }

    pub fn no_diagnosis(mut self) -> Self {
        self.diagnosis_code = None;
        self
    }

    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }

    /// Inpatient stay of `days` days starting on the claim date
    pub fn inpatient(mut self, days: u64) -> Self {
        self.detail = ClaimDetail::Inpatient {
            admission_date: Some(self.claim_date),
            discharge_date: self.claim_date.checked_add_days(chrono::Days::new(days)),
            diagnosis_related_group: None,
        };
        self
    }

    pub fn build(self) -> Claim {
        let mut claim = Claim::new(
            self.id,
            self.patient_id,
            self.provider_id,
            self.claim_date,
            self.amount,
            self.detail,
        )
        .with_fraud_score(self.fraud_score)
        .with_status(self.status);
        claim.diagnosis_code = self.diagnosis_code;
        claim.procedure_code = self.procedure_code;
        claim.flags = self.flags;
        claim
    }
}

/// `count` distinct low-risk claims `CLM-T-0000`, `CLM-T-0001`, ...
pub fn claim_batch(count: usize) -> Vec<Claim> {
    (0..count)
        .map(|i| {
            ClaimBuilder::new(format!("CLM-T-{:04}", i))
                .amount(Decimal::from(100 + i as u64))
                .build()
        })
        .collect()
}
