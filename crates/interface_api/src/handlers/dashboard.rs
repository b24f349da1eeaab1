//! Dashboard, graph and investigation handlers

use axum::{
    extract::{Query, State},
    Json,
};

use domain_claims::{DashboardStats, RelationshipGraph};

use crate::dto::claims::ClaimSummary;
use crate::dto::views::{InvestigationResponse, Source, SourceQuery};
use crate::{error::ApiError, AppState};

/// Headline statistics
pub async fn stats(
    State(state): State<AppState>,
    Query(query): Query<SourceQuery>,
) -> Result<Json<DashboardStats>, ApiError> {
    let stats = match query.source {
        Source::Feed => state.app.dashboard.stats().await?,
        Source::Claims => state.app.dashboard.local_stats().await,
    };
    Ok(Json(stats))
}

/// Relationship graph, with patient identifiers masked
pub async fn graph(
    State(state): State<AppState>,
    Query(query): Query<SourceQuery>,
) -> Result<Json<RelationshipGraph>, ApiError> {
    let graph = match query.source {
        Source::Feed => state.app.dashboard.graph().await?,
        Source::Claims => state.app.dashboard.local_graph().await,
    };
    Ok(Json(graph.redacted()))
}

pub async fn investigation(State(state): State<AppState>) -> Json<InvestigationResponse> {
    let dashboard = &state.app.dashboard;
    let summary = dashboard.investigation_summary().await;
    let queue = dashboard
        .investigation_queue()
        .await
        .iter()
        .map(ClaimSummary::from)
        .collect();
    Json(InvestigationResponse { summary, queue })
}
