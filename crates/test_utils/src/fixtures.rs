//! Pre-built Test Fixtures
//!
//! Consistent, predictable data for unit and integration tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::sync::Arc;

use core_kernel::{FixedClock, SharedClock};
use domain_claims::{UploadOutcomeProvider, UploadResult};
use infra_mock::{AcceptAll, FixedUploadOutcome, MockConfig, MockServices};

/// Fixture for dates and clocks
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// The reference "today" used across tests
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 25).unwrap()
    }

    /// Mid-morning on the reference day
    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 25, 10, 30, 0).unwrap()
    }

    /// A day in November 2024
    pub fn november(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, day).unwrap()
    }

    /// A clock frozen at [`TemporalFixtures::now`]
    pub fn clock() -> SharedClock {
        Arc::new(FixedClock::new(Self::now()))
    }
}

/// Fixture for claims files
pub struct CsvFixtures;

impl CsvFixtures {
    /// Two outpatient rows, one low risk and one high risk
    pub fn outpatient() -> &'static str {
        "\
ClaimID,PatientID,ProviderID,ServiceDate,ClmProcedureCode_1,ClmDiagnosisCode_1,TotalClaimAmount,PotentialFraud
CLM-UP-001,PAT-5001,PRV-6001,2024-11-18,99213,I10,1500.00,0
CLM-UP-002,PAT-5002,PRV-6001,2024-11-19,99215,E11.9,9800.00,0.86
"
    }

    /// One inpatient row
    pub fn inpatient() -> &'static str {
        "\
ClaimID,PatientID,ProviderID,AdmissionDate,DischargeDate,ClmDiagnosisCode_1,ClmProcedureCode_1,TotalClaimAmount,PotentialFraud
CLM-UP-101,PAT-5101,PRV-6101,2024-11-02,2024-11-06,I21.4,0210093,48250.00,0.64
"
    }

    /// Outpatient headers without ProviderID
    pub fn missing_provider() -> &'static str {
        "\
ClaimID,PatientID,ServiceDate,ClmProcedureCode_1,TotalClaimAmount
CLM-UP-201,PAT-5201,2024-11-18,99213,120.00
"
    }

    /// Rows whose ids already exist in the mock claim fixtures
    pub fn overlapping_fixture_ids() -> &'static str {
        "\
ClaimID,PatientID,ProviderID,TotalClaimAmount
CLM-2024-001,PAT-1000,PRV-2000,450.00
CLM-UP-301,PAT-5301,PRV-6301,75.00
"
    }
}

/// Fixture for mock services without simulated latency
pub struct ServiceFixtures;

impl ServiceFixtures {
    /// Fixture-backed services whose uploads accept every row
    pub fn instant() -> MockServices {
        Self::with_outcome(Arc::new(AcceptAll))
    }

    /// Fixture-backed services whose uploads are always rejected with `error`
    pub fn rejecting(error: &str) -> MockServices {
        Self::with_outcome(Arc::new(FixedUploadOutcome::reject(error)))
    }

    /// Fixture-backed services whose uploads always return `result`
    pub fn answering(result: UploadResult) -> MockServices {
        Self::with_outcome(Arc::new(FixedUploadOutcome::new(result)))
    }

    pub fn with_outcome(outcome: Arc<dyn UploadOutcomeProvider>) -> MockServices {
        MockServices::with_outcome(&MockConfig::instant(), outcome)
            .expect("bundled fixtures must decode")
    }
}
