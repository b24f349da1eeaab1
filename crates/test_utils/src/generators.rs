//! Property-Based Test Generators
//!
//! Proptest strategies producing claims and filters that respect domain
//! invariants (scores in [0, 1], non-negative amounts, valid dates).

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_claims::{
    Claim, ClaimDetail, ClaimFilter, ClaimStatus, RiskTier, SortDirection, SortField, SortSpec,
};

/// Strategy for fraud scores, biased towards the tier boundaries
pub fn fraud_score_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        0.0f64..=1.0,
        Just(0.4),
        Just(0.7),
        Just(0.0),
        Just(1.0),
    ]
}

pub fn status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Pending),
        Just(ClaimStatus::Reviewed),
        Just(ClaimStatus::Suspicious),
        Just(ClaimStatus::Cleared),
    ]
}

pub fn risk_tier_strategy() -> impl Strategy<Value = RiskTier> {
    prop_oneof![Just(RiskTier::Low), Just(RiskTier::Medium), Just(RiskTier::High)]
}

/// Strategy for amounts with two decimal places up to 100,000.00
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

pub fn claim_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u32..=30u32).prop_map(|day| NaiveDate::from_ymd_opt(2024, 11, day).unwrap())
}

pub fn diagnosis_strategy() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(
        prop_oneof![
            Just("I10"),
            Just("E11.9"),
            Just("E11.65"),
            Just("J45.909"),
            Just("M54.5"),
            Just("I21.4"),
        ]
        .prop_map(str::to_string),
    )
}

/// Strategy for a claim with an id drawn from `CLM-00000..CLM-00999`
pub fn claim_strategy() -> impl Strategy<Value = Claim> {
    (
        0u32..1000,
        amount_strategy(),
        fraud_score_strategy(),
        status_strategy(),
        claim_date_strategy(),
        diagnosis_strategy(),
    )
        .prop_map(|(n, amount, score, status, date, diagnosis)| {
            let mut claim = Claim::new(
                format!("CLM-{:05}", n),
                format!("PAT-{:03}", n % 40),
                format!("PRV-{:02}", n % 9),
                date,
                amount,
                ClaimDetail::Generic,
            )
            .with_fraud_score(score)
            .with_status(status);
            claim.diagnosis_code = diagnosis;
            claim
        })
}

/// Strategy for claim collections with unique ids
pub fn claims_strategy(max: usize) -> impl Strategy<Value = Vec<Claim>> {
    proptest::collection::vec(claim_strategy(), 0..max).prop_map(|mut claims| {
        let mut seen = std::collections::HashSet::new();
        claims.retain(|c| seen.insert(c.id.clone()));
        claims
    })
}

/// Strategy for filters, each criterion independently active or not
pub fn filter_strategy() -> impl Strategy<Value = ClaimFilter> {
    (
        proptest::option::of(risk_tier_strategy()),
        proptest::option::of(status_strategy()),
        proptest::option::of(prop_oneof![Just("e11"), Just("CLM-00"), Just("i"), Just("zzz")]),
    )
        .prop_map(|(risk_tier, status, search)| ClaimFilter {
            risk_tier,
            status,
            search: search.map(str::to_string),
        })
}

pub fn sort_field_strategy() -> impl Strategy<Value = SortField> {
    prop_oneof![
        Just(SortField::Id),
        Just(SortField::ClaimDate),
        Just(SortField::Amount),
        Just(SortField::FraudScore),
        Just(SortField::RiskTier),
        Just(SortField::Status),
        Just(SortField::PatientId),
        Just(SortField::ProviderId),
        Just(SortField::Diagnosis),
    ]
}

pub fn sort_strategy() -> impl Strategy<Value = SortSpec> {
    (
        sort_field_strategy(),
        prop_oneof![Just(SortDirection::Asc), Just(SortDirection::Desc)],
    )
        .prop_map(|(field, direction)| SortSpec::new(field, direction))
}
