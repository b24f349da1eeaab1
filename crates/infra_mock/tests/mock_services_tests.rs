//! Tests for the mock port adapters

use std::sync::Arc;
use std::time::{Duration, Instant};

use proptest::prelude::*;

use core_kernel::{AdapterHealth, ClaimId, HealthCheckable};
use domain_claims::{
    AuditAction, AuditPort, ClaimKind, ClaimStatus, ClaimsPort, GraphPort, NodeType, RiskTier,
    StatsPort, UploadOutcomeProvider, UploadRequest, UploadResult,
};
use infra_mock::config::UploadOutcomeConfig;
use infra_mock::{
    fixtures, FixedUploadOutcome, LatencyProfile, MockClaimsService, MockConfig, MockServices,
    RandomUploadOutcome, ScriptedUploadOutcome, SAMPLE_ROW_ERROR,
};

fn instant_services() -> MockServices {
    MockServices::with_outcome(&MockConfig::instant(), Arc::new(FixedUploadOutcome::new(UploadResult::accepted(3))))
        .unwrap()
}

fn request(rows: usize) -> UploadRequest {
    UploadRequest {
        filename: "november.csv".to_string(),
        row_count: rows,
    }
}

// ============================================================================
// Fixtures
// ============================================================================

mod fixture_tests {
    use super::*;

    #[test]
    fn test_claim_fixtures_decode() {
        let claims = fixtures::claims().unwrap();
        assert_eq!(claims.len(), 24);
        assert!(claims.iter().any(|c| c.kind() == ClaimKind::Inpatient));
        assert!(claims.iter().any(|c| c.kind() == ClaimKind::Outpatient));
        assert_eq!(claims.iter().filter(|c| c.risk_tier() == RiskTier::High).count(), 7);
        assert_eq!(claims.iter().filter(|c| c.status == ClaimStatus::Suspicious).count(), 4);
    }

    #[test]
    fn test_claim_ids_are_unique() {
        let claims = fixtures::claims().unwrap();
        let mut ids: Vec<&str> = claims.iter().map(|c| c.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), claims.len());
    }

    #[test]
    fn test_audit_fixture_keeps_unknown_actions() {
        let log = fixtures::audit_log().unwrap();
        assert_eq!(log.len(), 6);
        assert_eq!(log[0].id.as_str(), "AUD-001");
        assert_eq!(log[0].action, AuditAction::CsvUpload);
        assert!(log.iter().any(|e| e.action == AuditAction::Other("Export".to_string())));
    }

    #[test]
    fn test_graph_fixture_is_consistent() {
        let graph = fixtures::graph().unwrap();
        assert_eq!(graph.nodes.len(), 16);
        assert_eq!(graph.edges.len(), 12);
        assert!(graph.dangling_edges().is_empty());
        assert!(graph.nodes.iter().any(|n| n.node_type == NodeType::Provider && n.suspicious));
    }

    #[test]
    fn test_fixed_stats() {
        let stats = fixtures::dashboard_stats();
        assert_eq!(stats.total_claims, 150);
        assert_eq!(stats.flagged_claims, 42);
        assert_eq!(stats.high_risk_claims, 18);
        assert_eq!(stats.avg_fraud_score, 0.38);
        let values: Vec<u64> = stats.risk_distribution.iter().map(|b| b.value).collect();
        assert_eq!(values, vec![85, 47, 18]);
        assert_eq!(stats.trends.len(), 5);
        assert_eq!(stats.trends[4].count, 35);
        assert_eq!(stats.trends[4].flagged, 14);
    }
}

// ============================================================================
// Adapters
// ============================================================================

mod adapter_tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_claims_and_single_claim() {
        let services = instant_services();
        let claims = services.claims.fetch_claims().await.unwrap();
        assert_eq!(claims.len(), 24);

        let found = services
            .claims
            .fetch_claim(&ClaimId::new("CLM-2024-011"))
            .await
            .unwrap();
        assert_eq!(found.map(|c| c.status), Some(ClaimStatus::Suspicious));

        let missing = services.claims.fetch_claim(&ClaimId::new("CLM-404")).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_upload_uses_outcome_provider() {
        let services = instant_services();
        let result = services.claims.upload_claims(&request(10)).await.unwrap();
        assert_eq!(result, UploadResult::accepted(3));
    }

    #[tokio::test]
    async fn test_other_feeds() {
        let services = instant_services();
        assert_eq!(services.audit.fetch_audit_log().await.unwrap().len(), 6);
        assert_eq!(services.graph.fetch_graph().await.unwrap().nodes.len(), 16);
        assert_eq!(
            services.stats.fetch_dashboard_stats().await.unwrap().total_claims,
            150
        );
    }

    #[tokio::test]
    async fn test_health_checks() {
        let services = instant_services();
        assert_eq!(services.claims.health_check().await.status, AdapterHealth::Healthy);
        assert_eq!(services.graph.health_check().await.status, AdapterHealth::Healthy);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let service = MockClaimsService::new(
            Vec::new(),
            LatencyProfile::default(),
            Arc::new(FixedUploadOutcome::reject("no")),
        );
        let started = tokio::time::Instant::now();
        service.upload_claims(&request(1)).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn test_zero_latency_returns_quickly() {
        let services = instant_services();
        let started = Instant::now();
        services.claims.fetch_claims().await.unwrap();
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = MockConfig::instant();
        config.upload.error_rate = -0.1;
        assert!(MockServices::from_config(&config).is_err());
    }
}

// ============================================================================
// Upload outcomes
// ============================================================================

mod outcome_tests {
    use super::*;

    #[test]
    fn test_fixed_reject() {
        let outcome = FixedUploadOutcome::reject("Duplicate file");
        let result = outcome.next_outcome(&request(4));
        assert!(!result.success);
        assert_eq!(result.errors, vec!["Duplicate file".to_string()]);
    }

    #[test]
    fn test_scripted_order() {
        let outcome = ScriptedUploadOutcome::new(vec![
            UploadResult::accepted(1),
            UploadResult::rejected(vec!["second".into()]),
        ]);
        assert!(outcome.next_outcome(&request(5)).success);
        assert!(!outcome.next_outcome(&request(5)).success);
        assert_eq!(outcome.next_outcome(&request(5)).count, 5);
    }

    #[test]
    fn test_random_rates_roughly_hold() {
        let outcome = RandomUploadOutcome::seeded(42);
        let results: Vec<UploadResult> = (0..2000).map(|_| outcome.next_outcome(&request(1))).collect();
        let successes = results.iter().filter(|r| r.success).count();
        let with_error = results.iter().filter(|r| !r.errors.is_empty()).count();
        assert!((1700..=1900).contains(&successes), "successes = {}", successes);
        assert!((300..=500).contains(&with_error), "with_error = {}", with_error);
        assert!(results
            .iter()
            .flat_map(|r| r.errors.iter())
            .all(|e| e == SAMPLE_ROW_ERROR));
    }

    #[test]
    fn test_always_succeeding_config() {
        let outcome = RandomUploadOutcome::new(UploadOutcomeConfig {
            success_rate: 1.0,
            error_rate: 0.0,
            seed: Some(1),
            ..UploadOutcomeConfig::default()
        })
        .unwrap();
        for _ in 0..50 {
            let result = outcome.next_outcome(&request(1));
            assert!(result.success);
            assert!(result.errors.is_empty());
        }
    }

    proptest! {
        #[test]
        fn random_count_stays_in_range(seed in any::<u64>()) {
            let outcome = RandomUploadOutcome::seeded(seed);
            for _ in 0..10 {
                let result = outcome.next_outcome(&request(1));
                prop_assert!((50..150).contains(&result.count));
            }
        }
    }
}
