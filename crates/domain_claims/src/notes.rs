//! Investigation notes attached to claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, NoteId};
use crate::error::ClaimError;

/// A note recorded by an investigator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestigationNote {
    pub id: NoteId,
    pub claim_id: ClaimId,
    pub note: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

/// A note to record; the store assigns id and timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub claim_id: ClaimId,
    pub note: String,
    pub author: String,
}

impl NewNote {
    pub fn new(claim_id: ClaimId, note: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            claim_id,
            note: note.into(),
            author: author.into(),
        }
    }

    /// Trims the text and rejects blank notes
    pub fn normalized(self) -> Result<Self, ClaimError> {
        let trimmed = self.note.trim();
        if trimmed.is_empty() {
            return Err(ClaimError::EmptyNote);
        }
        Ok(Self {
            note: trimmed.to_string(),
            ..self
        })
    }

    pub fn into_note(self, id: NoteId, timestamp: DateTime<Utc>) -> InvestigationNote {
        InvestigationNote {
            id,
            claim_id: self.claim_id,
            note: self.note,
            author: self.author,
            timestamp,
        }
    }
}
