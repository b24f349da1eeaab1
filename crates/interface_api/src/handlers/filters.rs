//! Saved claims list filters

use axum::{extract::State, Json};
use validator::Validate;

use domain_claims::ClaimFilter;

use crate::dto::views::UpdateFiltersRequest;
use crate::{error::ApiError, AppState};

pub async fn get_filters(State(state): State<AppState>) -> Json<ClaimFilter> {
    Json(state.app.store.filters().await)
}

/// Merges the given criteria into the saved filters
pub async fn update_filters(
    State(state): State<AppState>,
    Json(request): Json<UpdateFiltersRequest>,
) -> Result<Json<ClaimFilter>, ApiError> {
    request.validate()?;
    let patch = request.into_patch()?;
    Ok(Json(state.app.store.set_filters(patch).await))
}
