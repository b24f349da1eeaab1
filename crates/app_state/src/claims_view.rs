//! Claims list view
//!
//! Loads the claim feed into the store and computes the visible table page.
//! Filters live in the store; sort and page are view state.
//!
//! Loads cannot be cancelled. Each load takes a generation number and only
//! the newest load may write its result, so a slow superseded fetch never
//! overwrites fresher data.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use core_kernel::{ClaimId, PortError};
use domain_claims::query::{filter_claims, total_pages};
use domain_claims::{transform, ClaimFilter, ClaimPage, ClaimsPort, PageRequest, SortField, SortSpec, PAGE_SIZE};

use crate::error::StoreError;
use crate::store::ClaimStore;

/// What happened to a finished load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Result written to the store
    Applied { count: usize },
    /// A newer load started meanwhile; result discarded
    Superseded,
}

#[derive(Debug, Clone, Copy)]
struct ViewState {
    sort: SortSpec,
    page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            sort: SortSpec::default(),
            page: 1,
        }
    }
}

pub struct ClaimsListView {
    store: Arc<ClaimStore>,
    claims: Arc<dyn ClaimsPort>,
    generation: AtomicU64,
    state: RwLock<ViewState>,
}

impl ClaimsListView {
    pub fn new(store: Arc<ClaimStore>, claims: Arc<dyn ClaimsPort>) -> Self {
        Self {
            store,
            claims,
            generation: AtomicU64::new(0),
            state: RwLock::new(ViewState::default()),
        }
    }

    /// Fetches the claim feed and replaces the store contents
    ///
    /// # Errors
    ///
    /// Propagates the port error after logging it; the store is untouched.
    pub async fn load(&self) -> Result<LoadOutcome, PortError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, "Loading claims");

        let claims = self.claims.fetch_claims().await.map_err(|e| {
            error!(error = %e, generation, transient = e.is_transient(), "Failed to load claims");
            e
        })?;

        if self.generation.load(Ordering::SeqCst) != generation {
            info!(generation, "Discarded superseded claims load");
            return Ok(LoadOutcome::Superseded);
        }

        let count = claims.len();
        self.store.set_claims(claims).await;
        Ok(LoadOutcome::Applied { count })
    }

    pub async fn sort(&self) -> SortSpec {
        self.state.read().await.sort
    }

    /// Column header click; also returns to the first page
    pub async fn toggle_sort(&self, field: SortField) -> SortSpec {
        let mut state = self.state.write().await;
        state.sort = state.sort.toggled(field);
        state.page = 1;
        state.sort
    }

    pub async fn set_sort(&self, sort: SortSpec) {
        self.state.write().await.sort = sort;
    }

    pub async fn set_page(&self, page: usize) {
        self.state.write().await.page = page;
    }

    /// The visible page under the view's own sort and page
    pub async fn current_page(&self) -> ClaimPage {
        let ViewState { sort, page } = *self.state.read().await;
        let result = self.page(sort, page).await;
        self.state.write().await.page = result.page;
        result
    }

    /// The visible page for an explicit sort and page number
    ///
    /// The page number is clamped into range, so an out-of-range request
    /// returns the nearest page rather than an empty one.
    pub async fn page(&self, sort: SortSpec, page: usize) -> ClaimPage {
        let filters = self.store.filters().await;
        self.page_filtered(&filters, sort, page).await
    }

    /// Like [`ClaimsListView::page`] but with filters supplied by the caller
    /// instead of the ones saved in the store
    pub async fn page_filtered(&self, filters: &ClaimFilter, sort: SortSpec, page: usize) -> ClaimPage {
        let claims = self.store.claims().await;
        let matched = filter_claims(&claims, filters).len();
        let request = PageRequest::new(page).clamp_to(total_pages(matched, PAGE_SIZE));
        transform(&claims, filters, &sort, request)
    }

    /// Row click: remembers the claim for the detail view
    pub async fn open(&self, id: &ClaimId) -> Result<(), StoreError> {
        self.store.select_claim(Some(id.clone())).await
    }
}
