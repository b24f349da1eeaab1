//! Tests for the claims view, triage, upload and dashboard workflows

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use core_kernel::{ClaimId, DomainPort, PortError};
use domain_claims::{
    AuditAction, AuditFilter, Claim, ClaimStatus, ClaimsPort, FilterPatch, RiskTier, SortField,
    SortSpec, UploadRequest, UploadResult, UploadStatus, PAGE_SIZE,
};
use infra_mock::{AcceptAll, LatencyProfile, MockClaimsService, MockServices};

use app_state::{
    LoadOutcome, Ports, TriageApp, UploadError, UploadFile, UploadSettings, DEFAULT_ACTOR,
};
use test_utils::{
    assert_sorted_by, claim_batch, ClaimBuilder, CsvFixtures, ServiceFixtures, TemporalFixtures,
    UnavailablePorts,
};

fn ports(services: MockServices) -> Ports {
    Ports {
        claims: services.claims,
        audit: services.audit,
        graph: services.graph,
        stats: services.stats,
    }
}

fn app_with(services: MockServices) -> TriageApp {
    TriageApp::new(ports(services), TemporalFixtures::clock(), UploadSettings::default())
}

fn app() -> TriageApp {
    app_with(ServiceFixtures::instant())
}

async fn loaded_app() -> TriageApp {
    let app = app();
    app.claims_view.load().await.unwrap();
    app
}

fn unavailable_app() -> TriageApp {
    let failing = Arc::new(UnavailablePorts);
    TriageApp::new(
        Ports {
            claims: failing.clone(),
            audit: failing.clone(),
            graph: failing.clone(),
            stats: failing,
        },
        TemporalFixtures::clock(),
        UploadSettings::default(),
    )
}

fn id(value: &str) -> ClaimId {
    ClaimId::new(value)
}

/// Claims feed whose first fetch blocks until released
struct GatedClaims {
    calls: AtomicUsize,
    started: Notify,
    release: Notify,
    first: Vec<Claim>,
    second: Vec<Claim>,
}

impl DomainPort for GatedClaims {}

#[async_trait]
impl ClaimsPort for GatedClaims {
    async fn fetch_claims(&self) -> Result<Vec<Claim>, PortError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            self.started.notify_one();
            self.release.notified().await;
            Ok(self.first.clone())
        } else {
            Ok(self.second.clone())
        }
    }

    async fn fetch_claim(&self, _id: &ClaimId) -> Result<Option<Claim>, PortError> {
        Ok(None)
    }

    async fn upload_claims(&self, request: &UploadRequest) -> Result<UploadResult, PortError> {
        Ok(UploadResult::accepted(request.row_count as u32))
    }
}

// ============================================================================
// Claims View Tests
// ============================================================================

mod claims_view_tests {
    use super::*;

    #[tokio::test]
    async fn test_load_fills_store() {
        let app = app();
        let outcome = app.claims_view.load().await.unwrap();

        assert_eq!(outcome, LoadOutcome::Applied { count: 24 });
        assert_eq!(app.store.claim_count().await, 24);
    }

    #[tokio::test]
    async fn test_failed_load_leaves_store_untouched() {
        let app = unavailable_app();
        app.store.set_claims(claim_batch(3)).await;

        let err = app.claims_view.load().await.unwrap_err();
        assert!(err.is_transient());
        assert_eq!(app.store.claim_count().await, 3);
    }

    #[tokio::test]
    async fn test_superseded_load_is_discarded() {
        let port = Arc::new(GatedClaims {
            calls: AtomicUsize::new(0),
            started: Notify::new(),
            release: Notify::new(),
            first: claim_batch(2),
            second: claim_batch(5),
        });
        let mut ports = ports(ServiceFixtures::instant());
        ports.claims = port.clone();
        let app = TriageApp::new(ports, TemporalFixtures::clock(), UploadSettings::default());

        let view = app.claims_view.clone();
        let slow = tokio::spawn(async move { view.load().await });
        port.started.notified().await;

        let fast = app.claims_view.load().await.unwrap();
        assert_eq!(fast, LoadOutcome::Applied { count: 5 });

        port.release.notify_one();
        let slow = slow.await.unwrap().unwrap();
        assert_eq!(slow, LoadOutcome::Superseded);
        assert_eq!(app.store.claim_count().await, 5);
    }

    #[tokio::test]
    async fn test_default_page_is_newest_first() {
        let app = loaded_app().await;
        let page = app.claims_view.current_page().await;

        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), PAGE_SIZE);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items[0].id.as_str(), "CLM-2024-024");
        assert_sorted_by(&page.items, &SortSpec::default());
    }

    #[tokio::test]
    async fn test_out_of_range_page_is_clamped() {
        let app = loaded_app().await;
        app.claims_view.set_page(9).await;

        let page = app.claims_view.current_page().await;
        assert_eq!(page.page, 2);
        assert_eq!(page.items.len(), 24 - PAGE_SIZE);
        assert_eq!(page.items.last().unwrap().id.as_str(), "CLM-2024-001");
    }

    #[tokio::test]
    async fn test_toggle_sort_resets_page() {
        let app = loaded_app().await;
        app.claims_view.set_page(2).await;

        let sort = app.claims_view.toggle_sort(SortField::FraudScore).await;
        assert_eq!(sort, SortSpec::asc(SortField::FraudScore));
        let sort = app.claims_view.toggle_sort(SortField::FraudScore).await;
        assert_eq!(sort, SortSpec::desc(SortField::FraudScore));

        let page = app.claims_view.current_page().await;
        assert_eq!(page.page, 1);
        assert_eq!(page.items[0].id.as_str(), "CLM-2024-011");
    }

    #[tokio::test]
    async fn test_page_applies_store_filters() {
        let app = loaded_app().await;
        app.store
            .set_filters(FilterPatch {
                risk_tier: Some(Some(RiskTier::High)),
                ..Default::default()
            })
            .await;

        let page = app.claims_view.current_page().await;
        assert_eq!(page.total_items, 7);
        assert!(page.items.iter().all(|c| c.fraud_score > 0.7));
    }

    #[tokio::test]
    async fn test_open_selects_claim() {
        let app = loaded_app().await;
        app.claims_view.open(&id("CLM-2024-002")).await.unwrap();

        let selected = app.store.selected_claim().await.unwrap();
        assert_eq!(selected.id.as_str(), "CLM-2024-002");
        assert!(app.claims_view.open(&id("CLM-NOPE")).await.is_err());
    }
}

// ============================================================================
// Triage Tests
// ============================================================================

mod triage_tests {
    use super::*;

    #[tokio::test]
    async fn test_status_change_is_audited() {
        let app = loaded_app().await;
        let update = app
            .triage
            .change_status(&id("CLM-2024-001"), ClaimStatus::Suspicious)
            .await
            .unwrap();
        assert_eq!(update.previous, ClaimStatus::Pending);

        let log = app.store.audit_log().await;
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].action, AuditAction::StatusChange);
        assert_eq!(log[0].user, DEFAULT_ACTOR);
        assert_eq!(log[0].details, "Claim status updated from pending to suspicious");
        assert_eq!(log[0].claim_id, Some(id("CLM-2024-001")));
        assert_eq!(log[0].timestamp, TemporalFixtures::now());
    }

    #[tokio::test]
    async fn test_status_change_for_unknown_claim() {
        let app = loaded_app().await;
        let err = app
            .triage
            .change_status(&id("CLM-NOPE"), ClaimStatus::Cleared)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(app.store.audit_log().await.is_empty());
    }

    #[tokio::test]
    async fn test_note_is_audited() {
        let app = loaded_app().await;
        let note = app
            .triage
            .add_note(&id("CLM-2024-004"), "Provider billed twice")
            .await
            .unwrap();

        assert_eq!(note.author, DEFAULT_ACTOR);
        assert_eq!(app.triage.notes(&id("CLM-2024-004")).await, vec![note]);

        let log = app.store.audit_log().await;
        assert_eq!(log[0].action, AuditAction::ClaimReview);
        assert_eq!(log[0].details, "Added investigation note");
    }

    #[tokio::test]
    async fn test_note_requires_known_claim() {
        let app = loaded_app().await;
        let err = app.triage.add_note(&id("CLM-NOPE"), "text").await.unwrap_err();

        assert!(err.is_not_found());
        assert!(app.store.notes().await.is_empty());
    }

    #[tokio::test]
    async fn test_claim_falls_back_to_feed() {
        let app = app();
        let claim = app.triage.claim(&id("CLM-2024-003")).await.unwrap();
        assert_eq!(claim.status, ClaimStatus::Reviewed);

        let err = app.triage.claim(&id("CLM-NOPE")).await.unwrap_err();
        assert!(err.is_not_found());
    }
}

// ============================================================================
// Upload Tests
// ============================================================================

mod upload_tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_upload_records_and_merges() {
        let app = loaded_app().await;
        let outcome = app
            .uploads
            .upload(UploadFile::csv("november.csv", CsvFixtures::outpatient()))
            .await
            .unwrap();

        assert_eq!(outcome.result.count, 2);
        assert_eq!(outcome.merged, 2);
        assert_eq!(outcome.record.status, UploadStatus::Success);
        assert_eq!(app.store.claim_count().await, 26);

        let history = app.store.upload_history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].record_count, 2);

        let log = app.store.audit_log().await;
        assert_eq!(log[0].action, AuditAction::CsvUpload);
        assert_eq!(log[0].details, "Uploaded november.csv with 2 records");

        let merged = app.store.claim(&id("CLM-UP-002")).await.unwrap();
        assert_eq!(merged.risk_tier(), RiskTier::High);
    }

    #[tokio::test]
    async fn test_upload_keeps_existing_claims() {
        let app = loaded_app().await;
        let before = app.store.claim(&id("CLM-2024-001")).await.unwrap();

        let outcome = app
            .uploads
            .upload(UploadFile::csv("overlap.csv", CsvFixtures::overlapping_fixture_ids()))
            .await
            .unwrap();

        assert_eq!(outcome.merged, 1);
        assert_eq!(app.store.claim(&id("CLM-2024-001")).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_rejected_upload_records_failure() {
        let app = app_with(ServiceFixtures::rejecting("Row 3: Invalid date format"));
        let err = app
            .uploads
            .upload(UploadFile::csv("bad.csv", CsvFixtures::outpatient()))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::Rejected(ref errors) if errors.len() == 1));
        assert!(!err.is_validation());

        let history = app.store.upload_history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, UploadStatus::Failed);
        assert_eq!(history[0].record_count, 0);
        assert_eq!(app.store.claim_count().await, 0);
        assert!(app.store.audit_log().await.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_records_failure() {
        let app = unavailable_app();
        let err = app
            .uploads
            .upload(UploadFile::csv("claims.csv", CsvFixtures::inpatient()))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::Port(_)));
        assert_eq!(app.store.upload_history().await[0].status, UploadStatus::Failed);
    }

    #[tokio::test]
    async fn test_invalid_csv_records_nothing() {
        let app = app();
        let err = app
            .uploads
            .upload(UploadFile::csv("claims.csv", CsvFixtures::missing_provider()))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert!(err.to_string().starts_with("CSV validation failed"));
        assert!(app.store.upload_history().await.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_file_type_rejected() {
        let app = app();
        let file = UploadFile {
            filename: "claims.xlsx".to_string(),
            content_type: Some("application/vnd.ms-excel".to_string()),
            bytes: CsvFixtures::outpatient().as_bytes().to_vec(),
        };

        let err = app.uploads.upload(file).await.unwrap_err();
        assert!(matches!(err, UploadError::InvalidFile(_)));
        assert!(app.store.upload_history().await.is_empty());
    }

    #[tokio::test]
    async fn test_oversized_file_rejected() {
        let settings = UploadSettings {
            max_file_mb: 0,
            ..UploadSettings::default()
        };
        let app = TriageApp::new(ports(ServiceFixtures::instant()), TemporalFixtures::clock(), settings);

        let err = app
            .uploads
            .upload(UploadFile::csv("claims.csv", CsvFixtures::outpatient()))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::InvalidFile(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_climbs_then_resets() {
        let slow = MockClaimsService::new(
            Vec::new(),
            LatencyProfile {
                upload_ms: 2000,
                ..LatencyProfile::none()
            },
            Arc::new(AcceptAll),
        );
        let mut ports = ports(ServiceFixtures::instant());
        ports.claims = Arc::new(slow);
        let settings = UploadSettings {
            progress_tick: Duration::from_millis(100),
            ..UploadSettings::default()
        };
        let app = TriageApp::new(ports, TemporalFixtures::clock(), settings);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut progress = app.uploads.progress();
        let recorder = {
            let seen = Arc::clone(&seen);
            tokio::spawn(async move {
                while progress.changed().await.is_ok() {
                    let value = *progress.borrow_and_update();
                    seen.lock().unwrap().push(value);
                }
            })
        };

        app.uploads
            .upload(UploadFile::csv("claims.csv", CsvFixtures::outpatient()))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        recorder.abort();

        let seen = seen.lock().unwrap().clone();
        assert!(seen.contains(&90), "progress never reached the ceiling: {seen:?}");
        assert!(seen.iter().all(|v| *v <= 100 && v % 10 == 0));
        let climbing: Vec<u8> = seen.iter().copied().take_while(|v| *v < 90).collect();
        assert!(climbing.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*app.uploads.progress().borrow(), 0);
    }

    #[tokio::test]
    async fn test_history_pages() {
        let app = app();
        for n in 0..17 {
            app.uploads
                .upload(UploadFile::csv(format!("batch-{n}.csv"), CsvFixtures::inpatient()))
                .await
                .unwrap();
        }

        let first = app.uploads.history_page(1).await;
        assert_eq!(first.items.len(), PAGE_SIZE);
        assert_eq!(first.items[0].filename, "batch-16.csv");
        assert_eq!(app.uploads.history_page(2).await.items.len(), 2);
    }
}

// ============================================================================
// Audit Trail and Dashboard Tests
// ============================================================================

mod view_tests {
    use super::*;

    #[tokio::test]
    async fn test_audit_trail_lists_fetched_then_local() {
        let app = loaded_app().await;
        app.triage
            .change_status(&id("CLM-2024-006"), ClaimStatus::Reviewed)
            .await
            .unwrap();

        let entries = app.audit.entries(&AuditFilter::default()).await.unwrap();
        assert_eq!(entries.len(), 7);
        assert_eq!(entries[0].id.as_str(), "AUD-001");
        assert_eq!(entries[6].claim_id, Some(id("CLM-2024-006")));
    }

    #[tokio::test]
    async fn test_audit_trail_filters() {
        let app = loaded_app().await;
        let filter = AuditFilter::default().with_action(AuditAction::StatusChange);
        let entries = app.audit.entries(&filter).await.unwrap();
        assert_eq!(entries.len(), 2);

        let filter = AuditFilter::default().with_search("AUDITOR");
        let entries = app.audit.entries(&filter).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::Other("Export".to_string()));
    }

    #[tokio::test]
    async fn test_audit_trail_propagates_errors() {
        let app = unavailable_app();
        assert!(app.audit.entries(&AuditFilter::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_dashboard_feeds() {
        let app = loaded_app().await;
        let stats = app.dashboard.stats().await.unwrap();
        assert_eq!(stats.total_claims, 150);

        let local = app.dashboard.local_stats().await;
        assert_eq!(local.total_claims, 24);
        assert_eq!(local.high_risk_claims, 7);

        let graph = app.dashboard.graph().await.unwrap();
        assert_eq!(graph.nodes.len(), 16);
        assert!(graph.dangling_edges().is_empty());
    }

    #[tokio::test]
    async fn test_investigation_queue_and_summary() {
        let app = loaded_app().await;
        app.triage
            .add_note(&id("CLM-2024-011"), "Check admission records")
            .await
            .unwrap();

        let queue: Vec<String> = app
            .dashboard
            .investigation_queue()
            .await
            .into_iter()
            .map(|c| c.id.into_inner())
            .collect();
        assert_eq!(
            queue,
            vec![
                "CLM-2024-011",
                "CLM-2024-004",
                "CLM-2024-019",
                "CLM-2024-002",
                "CLM-2024-015",
                "CLM-2024-007",
                "CLM-2024-023",
            ]
        );

        let summary = app.dashboard.investigation_summary().await;
        assert_eq!(summary.suspicious, 7);
        assert_eq!(summary.reviewed, 4);
        assert_eq!(summary.cleared, 4);
        assert_eq!(summary.notes, 1);
    }

    #[tokio::test]
    async fn test_local_graph_built_from_store() {
        let app = app();
        app.store
            .set_claims(vec![ClaimBuilder::new("CLM-G-1").score(0.9).build()])
            .await;

        let graph = app.dashboard.local_graph().await;
        assert_eq!(graph.nodes.len(), 3);
    }
}
