//! Triage actions on a single claim
//!
//! Status changes and notes go through here so that every action lands in
//! the audit trail.

use std::sync::Arc;
use tracing::{error, info};

use core_kernel::ClaimId;
use domain_claims::{
    AuditAction, Claim, ClaimStatus, ClaimsPort, InvestigationNote, NewAuditEntry, NewNote,
};

use crate::error::{StoreError, WorkflowError};
use crate::store::{ClaimStore, StatusUpdate};

/// Author recorded on notes and audit entries when none is configured
pub const DEFAULT_ACTOR: &str = "Current User";

pub struct TriageService {
    store: Arc<ClaimStore>,
    claims: Arc<dyn ClaimsPort>,
    actor: String,
}

impl TriageService {
    pub fn new(store: Arc<ClaimStore>, claims: Arc<dyn ClaimsPort>) -> Self {
        Self {
            store,
            claims,
            actor: DEFAULT_ACTOR.to_string(),
        }
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// Finds a claim in the store, falling back to the claims feed
    ///
    /// # Errors
    ///
    /// `StoreError::ClaimNotFound` when neither source knows the id.
    pub async fn claim(&self, id: &ClaimId) -> Result<Claim, WorkflowError> {
        if let Some(claim) = self.store.claim(id).await {
            return Ok(claim);
        }
        match self.claims.fetch_claim(id).await {
            Ok(Some(claim)) => Ok(claim),
            Ok(None) => Err(StoreError::ClaimNotFound(id.clone()).into()),
            Err(e) => {
                error!(claim_id = %id, error = %e, "Failed to fetch claim");
                Err(e.into())
            }
        }
    }

    /// Sets a claim's status and records a `Status Change` audit entry
    pub async fn change_status(
        &self,
        id: &ClaimId,
        status: ClaimStatus,
    ) -> Result<StatusUpdate, WorkflowError> {
        let update = self.store.update_claim_status(id, status).await?;
        self.store
            .add_audit_entry(
                NewAuditEntry::new(
                    self.store.clock().now(),
                    AuditAction::StatusChange,
                    &self.actor,
                    format!("Claim status updated from {} to {}", update.previous, status),
                )
                .for_claim(id.clone()),
            )
            .await;
        Ok(update)
    }

    /// Attaches a note to a stored claim and records a `Claim Review` audit entry
    ///
    /// # Errors
    ///
    /// `ClaimNotFound` for unknown claims, `EmptyNote` for blank text.
    pub async fn add_note(
        &self,
        id: &ClaimId,
        text: impl Into<String>,
    ) -> Result<InvestigationNote, WorkflowError> {
        if self.store.claim(id).await.is_none() {
            return Err(StoreError::ClaimNotFound(id.clone()).into());
        }
        let note = self
            .store
            .add_note(NewNote::new(id.clone(), text, &self.actor))
            .await?;
        self.store
            .add_audit_entry(
                NewAuditEntry::new(
                    note.timestamp,
                    AuditAction::ClaimReview,
                    &self.actor,
                    "Added investigation note",
                )
                .for_claim(id.clone()),
            )
            .await;
        info!(claim_id = %id, note_id = %note.id, "Recorded claim review");
        Ok(note)
    }

    pub async fn notes(&self, id: &ClaimId) -> Vec<InvestigationNote> {
        self.store.notes_for(id).await
    }
}
