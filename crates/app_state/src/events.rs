//! Store change notifications

use serde::Serialize;

use core_kernel::{AuditEntryId, ClaimId, NoteId, UploadId};
use domain_claims::{ClaimFilter, ClaimStatus};

/// Emitted after each committed store mutation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoreEvent {
    ClaimsReplaced { count: usize },
    ClaimsMerged { added: usize },
    ClaimSelected { claim_id: Option<ClaimId> },
    ClaimStatusChanged {
        claim_id: ClaimId,
        from: ClaimStatus,
        to: ClaimStatus,
    },
    UploadRecorded { upload_id: UploadId },
    NoteAdded { claim_id: ClaimId, note_id: NoteId },
    AuditRecorded { entry_id: AuditEntryId },
    FiltersChanged { filters: ClaimFilter },
}
