//! Audit trail handlers

use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use domain_claims::{AuditEntry, AuditFilter};

use crate::dto::views::AuditQuery;
use crate::{error::ApiError, AppState};

/// Lists audit entries: the fetched log, then entries recorded locally
pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<Vec<AuditEntry>>, ApiError> {
    query.validate()?;
    let entries = state.app.audit.entries(&AuditFilter::from(query)).await?;
    Ok(Json(entries))
}
