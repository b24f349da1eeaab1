//! Dashboard, relationship graph and investigation loaders

use std::sync::Arc;
use tracing::error;

use core_kernel::PortError;
use domain_claims::stats::investigation_queue;
use domain_claims::{
    Claim, DashboardStats, GraphPort, InvestigationSummary, RelationshipGraph, StatsPort,
};

use crate::store::ClaimStore;

pub struct DashboardService {
    store: Arc<ClaimStore>,
    stats: Arc<dyn StatsPort>,
    graph: Arc<dyn GraphPort>,
}

impl DashboardService {
    pub fn new(store: Arc<ClaimStore>, stats: Arc<dyn StatsPort>, graph: Arc<dyn GraphPort>) -> Self {
        Self { store, stats, graph }
    }

    /// Headline figures from the statistics feed
    pub async fn stats(&self) -> Result<DashboardStats, PortError> {
        self.stats.fetch_dashboard_stats().await.map_err(|e| {
            error!(error = %e, "Failed to load dashboard stats");
            e
        })
    }

    /// Figures computed from the claims currently in the store
    pub async fn local_stats(&self) -> DashboardStats {
        DashboardStats::from_claims(&self.store.claims().await)
    }

    /// Relationship graph from the graph feed
    pub async fn graph(&self) -> Result<RelationshipGraph, PortError> {
        self.graph.fetch_graph().await.map_err(|e| {
            error!(error = %e, "Failed to load graph data");
            e
        })
    }

    /// Relationship graph built from the claims in the store
    pub async fn local_graph(&self) -> RelationshipGraph {
        RelationshipGraph::from_claims(&self.store.claims().await)
    }

    pub async fn investigation_summary(&self) -> InvestigationSummary {
        let snapshot = self.store.snapshot().await;
        InvestigationSummary::compute(&snapshot.claims, &snapshot.notes)
    }

    /// Claims needing investigation, highest fraud score first
    pub async fn investigation_queue(&self) -> Vec<Claim> {
        let claims = self.store.claims().await;
        investigation_queue(&claims).into_iter().cloned().collect()
    }
}
