//! Audit trail view

use std::sync::Arc;
use tracing::{debug, error};

use core_kernel::PortError;
use domain_claims::{AuditEntry, AuditFilter, AuditPort};

use crate::store::ClaimStore;

/// Server-side audit log combined with entries recorded this session
pub struct AuditTrail {
    store: Arc<ClaimStore>,
    audit: Arc<dyn AuditPort>,
}

impl AuditTrail {
    pub fn new(store: Arc<ClaimStore>, audit: Arc<dyn AuditPort>) -> Self {
        Self { store, audit }
    }

    /// Fetched entries first, then local ones, narrowed by `filter`
    ///
    /// # Errors
    ///
    /// Propagates the port error after logging it.
    pub async fn entries(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>, PortError> {
        let mut entries = self.audit.fetch_audit_log().await.map_err(|e| {
            error!(error = %e, "Failed to load audit log");
            e
        })?;
        entries.extend(self.store.audit_log().await);

        let matched: Vec<AuditEntry> = filter.apply(&entries).into_iter().cloned().collect();
        debug!(total = entries.len(), matched = matched.len(), "Filtered audit trail");
        Ok(matched)
    }
}
