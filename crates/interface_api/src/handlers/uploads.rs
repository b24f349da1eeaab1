//! Upload handlers
//!
//! The file is the raw request body; its name travels in the query string.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use app_state::UploadFile;
use domain_claims::ingest::template_csv;
use domain_claims::{Page, UploadRecord};

use crate::dto::uploads::{HistoryQuery, UploadQuery, UploadResponse};
use crate::{error::ApiError, AppState};

/// Uploads a claims file
pub async fn upload_file(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    query.validate()?;
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_string());

    let file = UploadFile {
        filename: query.filename,
        content_type,
        bytes: body.to_vec(),
    };
    let outcome = state.app.uploads.upload(file).await?;
    Ok((StatusCode::CREATED, Json(UploadResponse::from(outcome))))
}

/// One page of the upload history, newest first
pub async fn upload_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Page<UploadRecord>>, ApiError> {
    query.validate()?;
    let page = state.app.uploads.history_page(query.page.unwrap_or(1)).await;
    Ok(Json(page))
}

/// Sample claims file
pub async fn download_template() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"claims_template.csv\"",
            ),
        ],
        template_csv(),
    )
}
