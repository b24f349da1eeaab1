//! Investigation note DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_claims::InvestigationNote;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateNoteRequest {
    #[validate(length(min = 1, max = 2000))]
    pub note: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NoteResponse {
    pub id: String,
    pub claim_id: String,
    pub note: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

impl From<InvestigationNote> for NoteResponse {
    fn from(note: InvestigationNote) -> Self {
        Self {
            id: note.id.into_inner(),
            claim_id: note.claim_id.into_inner(),
            note: note.note,
            author: note.author,
            timestamp: note.timestamp,
        }
    }
}
