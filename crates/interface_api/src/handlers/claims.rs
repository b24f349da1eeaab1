//! Claims handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;
use validator::Validate;

use core_kernel::ClaimId;
use domain_claims::{ClaimStatus, Page};

use crate::dto::claims::*;
use crate::dto::notes::NoteResponse;
use crate::{error::ApiError, AppState};

/// Lists one page of claims
pub async fn list_claims(
    State(state): State<AppState>,
    Query(query): Query<ClaimListQuery>,
) -> Result<Json<Page<ClaimSummary>>, ApiError> {
    query.validate()?;
    let filter = query.filter_over(state.app.store.filters().await)?;
    let sort = query.sort_spec()?;

    let page = state
        .app
        .claims_view
        .page_filtered(&filter, sort, query.page())
        .await;
    Ok(Json(page.map(ClaimSummary::from)))
}

/// Reloads the claims feed into the store
pub async fn refresh_claims(
    State(state): State<AppState>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let response = match state.app.claims_view.load().await? {
        app_state::LoadOutcome::Applied { count } => RefreshResponse {
            applied: true,
            count: Some(count),
        },
        app_state::LoadOutcome::Superseded => RefreshResponse {
            applied: false,
            count: None,
        },
    };
    Ok(Json(response))
}

/// Gets a claim by ID, with its notes
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClaimDetailResponse>, ApiError> {
    let id = ClaimId::new(id);
    let claim = state.app.triage.claim(&id).await?;
    if let Err(e) = state.app.claims_view.open(&id).await {
        debug!(claim_id = %id, error = %e, "Claim served from feed only; not selected");
    }

    let notes = state
        .app
        .triage
        .notes(&id)
        .await
        .into_iter()
        .map(NoteResponse::from)
        .collect();
    Ok(Json(ClaimDetailResponse::new(&claim, notes)))
}

/// Updates claim status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<StatusChangeResponse>, ApiError> {
    request.validate()?;
    let status: ClaimStatus = request.status.trim().parse()?;

    let update = state
        .app
        .triage
        .change_status(&ClaimId::new(id), status)
        .await?;
    Ok(Json(StatusChangeResponse {
        previous: update.previous,
        claim: ClaimSummary::from(&update.claim),
    }))
}
