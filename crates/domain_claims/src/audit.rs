//! Audit trail entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{AuditEntryId, ClaimId};

/// Kind of audited action
///
/// The known actions have fixed labels; anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuditAction {
    CsvUpload,
    ClaimReview,
    StatusChange,
    Other(String),
}

impl AuditAction {
    pub fn label(&self) -> &str {
        match self {
            AuditAction::CsvUpload => "CSV Upload",
            AuditAction::ClaimReview => "Claim Review",
            AuditAction::StatusChange => "Status Change",
            AuditAction::Other(label) => label,
        }
    }
}

impl From<String> for AuditAction {
    fn from(label: String) -> Self {
        match label.as_str() {
            "CSV Upload" => AuditAction::CsvUpload,
            "Claim Review" => AuditAction::ClaimReview,
            "Status Change" => AuditAction::StatusChange,
            _ => AuditAction::Other(label),
        }
    }
}

impl From<&str> for AuditAction {
    fn from(label: &str) -> Self {
        AuditAction::from(label.to_string())
    }
}

impl From<AuditAction> for String {
    fn from(action: AuditAction) -> Self {
        action.label().to_string()
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A recorded action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: AuditEntryId,
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    pub user: String,
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_id: Option<ClaimId>,
}

/// An action to record; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditEntry {
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    pub user: String,
    pub details: String,
    pub claim_id: Option<ClaimId>,
}

impl NewAuditEntry {
    pub fn new(
        timestamp: DateTime<Utc>,
        action: AuditAction,
        user: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            action,
            user: user.into(),
            details: details.into(),
            claim_id: None,
        }
    }

    pub fn for_claim(mut self, claim_id: ClaimId) -> Self {
        self.claim_id = Some(claim_id);
        self
    }

    pub fn into_entry(self, id: AuditEntryId) -> AuditEntry {
        AuditEntry {
            id,
            timestamp: self.timestamp,
            action: self.action,
            user: self.user,
            details: self.details,
            claim_id: self.claim_id,
        }
    }
}

/// Audit log filter: exact action plus case-insensitive search over
/// details, user and claim id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditFilter {
    pub action: Option<AuditAction>,
    pub search: Option<String>,
}

impl AuditFilter {
    pub fn with_action(mut self, action: AuditAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.is_empty() { None } else { Some(term) };
        self
    }

    /// Entries passing the filter, in input order
    pub fn apply<'a>(&self, entries: &'a [AuditEntry]) -> Vec<&'a AuditEntry> {
        let needle = self.search.as_ref().map(|s| s.to_lowercase());
        entries
            .iter()
            .filter(|entry| {
                self.action.as_ref().map_or(true, |action| &entry.action == action)
            })
            .filter(|entry| match &needle {
                Some(needle) => {
                    entry.details.to_lowercase().contains(needle)
                        || entry.user.to_lowercase().contains(needle)
                        || entry
                            .claim_id
                            .as_ref()
                            .map_or(false, |id| id.as_str().to_lowercase().contains(needle))
                }
                None => true,
            })
            .collect()
    }
}
