//! Application State and Workflows
//!
//! The record store plus the workflows the dashboard views run against it.
//! Workflows reach data sources only through the port traits from
//! `domain_claims`, so the same code runs against mock or real adapters.
//!
//! # Example
//!
//! ```rust,ignore
//! use app_state::{Ports, TriageApp};
//!
//! let app = TriageApp::new(ports, Arc::new(SystemClock), UploadSettings::default());
//! app.claims_view.load().await?;
//! let page = app.claims_view.current_page().await;
//! ```

pub mod audit_trail;
pub mod claims_view;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod store;
pub mod triage;
pub mod upload;

pub use audit_trail::AuditTrail;
pub use claims_view::{ClaimsListView, LoadOutcome};
pub use dashboard::DashboardService;
pub use error::{StoreError, UploadError, WorkflowError};
pub use events::StoreEvent;
pub use store::{ClaimStore, StatusUpdate, StoreSnapshot};
pub use triage::{TriageService, DEFAULT_ACTOR};
pub use upload::{UploadFile, UploadOutcome, UploadService, UploadSettings};

use std::sync::Arc;

use core_kernel::SharedClock;
use domain_claims::{AuditPort, ClaimsPort, GraphPort, StatsPort};

/// Data sources the workflows depend on
#[derive(Clone)]
pub struct Ports {
    pub claims: Arc<dyn ClaimsPort>,
    pub audit: Arc<dyn AuditPort>,
    pub graph: Arc<dyn GraphPort>,
    pub stats: Arc<dyn StatsPort>,
}

/// One store and every workflow wired to it
#[derive(Clone)]
pub struct TriageApp {
    pub store: Arc<ClaimStore>,
    pub claims_view: Arc<ClaimsListView>,
    pub triage: Arc<TriageService>,
    pub uploads: Arc<UploadService>,
    pub audit: Arc<AuditTrail>,
    pub dashboard: Arc<DashboardService>,
}

impl TriageApp {
    pub fn new(ports: Ports, clock: SharedClock, settings: UploadSettings) -> Self {
        let store = Arc::new(ClaimStore::new(clock));
        let actor = settings.actor.clone();
        Self {
            claims_view: Arc::new(ClaimsListView::new(Arc::clone(&store), Arc::clone(&ports.claims))),
            triage: Arc::new(
                TriageService::new(Arc::clone(&store), Arc::clone(&ports.claims)).with_actor(actor),
            ),
            uploads: Arc::new(UploadService::new(Arc::clone(&store), Arc::clone(&ports.claims), settings)),
            audit: Arc::new(AuditTrail::new(Arc::clone(&store), ports.audit)),
            dashboard: Arc::new(DashboardService::new(Arc::clone(&store), ports.stats, ports.graph)),
            store,
        }
    }
}
