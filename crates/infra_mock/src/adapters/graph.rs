//! Mock relationship graph feed

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{instrument, warn};

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_claims::{GraphPort, RelationshipGraph};

use crate::config::{simulate, LatencyProfile};
use crate::error::MockError;
use crate::fixtures;

#[derive(Clone)]
pub struct MockGraphService {
    graph: Arc<RelationshipGraph>,
    latency: LatencyProfile,
}

impl MockGraphService {
    pub fn new(graph: RelationshipGraph, latency: LatencyProfile) -> Self {
        Self {
            graph: Arc::new(graph),
            latency,
        }
    }

    pub fn from_fixtures(latency: LatencyProfile) -> Result<Self, MockError> {
        Ok(Self::new(fixtures::graph()?, latency))
    }
}

impl DomainPort for MockGraphService {}

#[async_trait]
impl HealthCheckable for MockGraphService {
    /// Degraded when some edge points at a missing node
    async fn health_check(&self) -> HealthCheckResult {
        let dangling = self.graph.dangling_edges().len();
        let mut result = HealthCheckResult::healthy("mock-graph-service");
        if dangling > 0 {
            warn!(dangling, "Graph fixture has dangling edges");
            result.status = AdapterHealth::Degraded;
            result.message = Some(format!("{} edges reference unknown nodes", dangling));
        }
        result
    }
}

#[async_trait]
impl GraphPort for MockGraphService {
    #[instrument(skip(self))]
    async fn fetch_graph(&self) -> Result<RelationshipGraph, PortError> {
        simulate(self.latency.graph_ms).await;
        Ok(self.graph.as_ref().clone())
    }
}
