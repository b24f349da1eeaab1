//! Record store
//!
//! The single source of truth for everything the dashboard has loaded or
//! recorded during the session: claims, the selected claim, upload history,
//! investigation notes, locally recorded audit entries and the claims list
//! filters. Nothing is persisted beyond the process lifetime.
//!
//! # Concurrency
//!
//! State sits behind a `tokio::sync::RwLock`. Every mutation commits under
//! the write lock and then publishes a [`StoreEvent`] on a broadcast channel.
//! Subscribers that fall behind lose the oldest events; writers never wait
//! on them.
//!
//! # Example
//!
//! ```rust,ignore
//! let store = Arc::new(ClaimStore::new(Arc::new(SystemClock)));
//! let mut events = store.subscribe();
//!
//! store.set_claims(claims).await;
//! store.update_claim_status(&id, ClaimStatus::Suspicious).await?;
//! ```

use serde::Serialize;
use std::collections::HashSet;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info};

use core_kernel::{AuditEntryId, ClaimId, NoteId, SharedClock};
use domain_claims::{
    AuditEntry, Claim, ClaimFilter, ClaimStatus, FilterPatch, InvestigationNote, NewAuditEntry,
    NewNote, UploadRecord,
};

use crate::error::StoreError;
use crate::events::StoreEvent;

/// Buffered events per subscriber before the oldest are dropped
pub const EVENT_CAPACITY: usize = 256;

/// Point-in-time copy of the store contents
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreSnapshot {
    pub claims: Vec<Claim>,
    pub selected_claim: Option<ClaimId>,
    /// Newest first
    pub upload_history: Vec<UploadRecord>,
    /// Newest first
    pub notes: Vec<InvestigationNote>,
    /// Locally recorded entries, newest first
    pub audit_log: Vec<AuditEntry>,
    pub filters: ClaimFilter,
}

/// Result of a status change
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub previous: ClaimStatus,
    pub claim: Claim,
}

/// Shared session state with change notifications
pub struct ClaimStore {
    state: RwLock<StoreSnapshot>,
    events: broadcast::Sender<StoreEvent>,
    clock: SharedClock,
}

impl ClaimStore {
    pub fn new(clock: SharedClock) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: RwLock::new(StoreSnapshot::default()),
            events,
            clock,
        }
    }

    /// Clock used to stamp notes, audit entries and uploads
    pub fn clock(&self) -> &SharedClock {
        &self.clock
    }

    /// Receives every event published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: StoreEvent) {
        // No subscribers is not an error
        let _ = self.events.send(event);
    }

    // ------------------------------------------------------------------
    // Claims
    // ------------------------------------------------------------------

    /// Replaces the whole claim collection
    pub async fn set_claims(&self, claims: Vec<Claim>) {
        let count = claims.len();
        {
            let mut state = self.state.write().await;
            state.claims = claims;
        }
        info!(count, "Replaced claims");
        self.publish(StoreEvent::ClaimsReplaced { count });
    }

    /// Appends claims whose id is not yet present; returns how many were added
    ///
    /// Within `incoming`, the first claim with a given id wins.
    pub async fn merge_claims(&self, incoming: Vec<Claim>) -> usize {
        let added = {
            let mut state = self.state.write().await;
            let mut known: HashSet<ClaimId> = state.claims.iter().map(|c| c.id.clone()).collect();
            let before = state.claims.len();
            for claim in incoming {
                if known.insert(claim.id.clone()) {
                    state.claims.push(claim);
                }
            }
            state.claims.len() - before
        };
        info!(added, "Merged claims");
        self.publish(StoreEvent::ClaimsMerged { added });
        added
    }

    pub async fn claims(&self) -> Vec<Claim> {
        self.state.read().await.claims.clone()
    }

    pub async fn claim(&self, id: &ClaimId) -> Option<Claim> {
        self.state
            .read()
            .await
            .claims
            .iter()
            .find(|c| &c.id == id)
            .cloned()
    }

    pub async fn claim_count(&self) -> usize {
        self.state.read().await.claims.len()
    }

    /// Selects a claim for the detail view, or clears the selection
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ClaimNotFound` if `id` is not in the store.
    pub async fn select_claim(&self, id: Option<ClaimId>) -> Result<(), StoreError> {
        {
            let mut state = self.state.write().await;
            if let Some(id) = &id {
                if !state.claims.iter().any(|c| &c.id == id) {
                    return Err(StoreError::ClaimNotFound(id.clone()));
                }
            }
            state.selected_claim = id.clone();
        }
        self.publish(StoreEvent::ClaimSelected { claim_id: id });
        Ok(())
    }

    /// Current version of the selected claim
    pub async fn selected_claim(&self) -> Option<Claim> {
        let state = self.state.read().await;
        let id = state.selected_claim.as_ref()?;
        state.claims.iter().find(|c| &c.id == id).cloned()
    }

    /// Sets the workflow status of one claim
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ClaimNotFound` if `id` is not in the store.
    pub async fn update_claim_status(
        &self,
        id: &ClaimId,
        status: ClaimStatus,
    ) -> Result<StatusUpdate, StoreError> {
        let update = {
            let mut state = self.state.write().await;
            let claim = state
                .claims
                .iter_mut()
                .find(|c| &c.id == id)
                .ok_or_else(|| StoreError::ClaimNotFound(id.clone()))?;
            let previous = claim.status;
            claim.status = status;
            StatusUpdate {
                previous,
                claim: claim.clone(),
            }
        };
        info!(claim_id = %id, from = %update.previous, to = %status, "Updated claim status");
        self.publish(StoreEvent::ClaimStatusChanged {
            claim_id: id.clone(),
            from: update.previous,
            to: status,
        });
        Ok(update)
    }

    // ------------------------------------------------------------------
    // Uploads, notes, audit
    // ------------------------------------------------------------------

    /// Records an upload at the top of the history
    pub async fn add_upload(&self, record: UploadRecord) {
        let upload_id = record.id.clone();
        self.state.write().await.upload_history.insert(0, record);
        debug!(upload_id = %upload_id, "Recorded upload");
        self.publish(StoreEvent::UploadRecorded { upload_id });
    }

    pub async fn upload_history(&self) -> Vec<UploadRecord> {
        self.state.read().await.upload_history.clone()
    }

    /// Records an investigation note, assigning id and timestamp
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Claim(ClaimError::EmptyNote)` for blank text.
    pub async fn add_note(&self, note: NewNote) -> Result<InvestigationNote, StoreError> {
        let note = note
            .normalized()?
            .into_note(NoteId::generate(), self.clock.now());
        self.state.write().await.notes.insert(0, note.clone());
        debug!(claim_id = %note.claim_id, note_id = %note.id, "Added investigation note");
        self.publish(StoreEvent::NoteAdded {
            claim_id: note.claim_id.clone(),
            note_id: note.id.clone(),
        });
        Ok(note)
    }

    pub async fn notes(&self) -> Vec<InvestigationNote> {
        self.state.read().await.notes.clone()
    }

    /// Notes attached to one claim, newest first
    pub async fn notes_for(&self, claim_id: &ClaimId) -> Vec<InvestigationNote> {
        self.state
            .read()
            .await
            .notes
            .iter()
            .filter(|n| &n.claim_id == claim_id)
            .cloned()
            .collect()
    }

    /// Records an audit entry, assigning its id
    pub async fn add_audit_entry(&self, entry: NewAuditEntry) -> AuditEntry {
        let entry = entry.into_entry(AuditEntryId::generate());
        self.state.write().await.audit_log.insert(0, entry.clone());
        debug!(entry_id = %entry.id, action = %entry.action, "Recorded audit entry");
        self.publish(StoreEvent::AuditRecorded {
            entry_id: entry.id.clone(),
        });
        entry
    }

    /// Locally recorded audit entries, newest first
    pub async fn audit_log(&self) -> Vec<AuditEntry> {
        self.state.read().await.audit_log.clone()
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    pub async fn filters(&self) -> ClaimFilter {
        self.state.read().await.filters.clone()
    }

    /// Merges a partial filter update; returns the resulting filters
    pub async fn set_filters(&self, patch: FilterPatch) -> ClaimFilter {
        let filters = {
            let mut state = self.state.write().await;
            state.filters.apply(patch);
            state.filters.clone()
        };
        self.publish(StoreEvent::FiltersChanged {
            filters: filters.clone(),
        });
        filters
    }

    pub async fn clear_filters(&self) -> ClaimFilter {
        self.set_filters(FilterPatch::clear_all()).await
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        self.state.read().await.clone()
    }
}
