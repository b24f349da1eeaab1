//! Investigation note handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::ClaimId;

use crate::dto::notes::{CreateNoteRequest, NoteResponse};
use crate::{error::ApiError, AppState};

/// Lists a claim's notes, newest first
pub async fn list_notes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<NoteResponse>>, ApiError> {
    let id = ClaimId::new(id);
    // 404 for claims nobody knows about
    state.app.triage.claim(&id).await?;

    let notes = state.app.triage.notes(&id).await;
    Ok(Json(notes.into_iter().map(NoteResponse::from).collect()))
}

/// Adds a note to a claim
pub async fn create_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<NoteResponse>), ApiError> {
    request.validate()?;
    let note = state
        .app
        .triage
        .add_note(&ClaimId::new(id), request.note)
        .await?;
    Ok((StatusCode::CREATED, Json(NoteResponse::from(note))))
}
