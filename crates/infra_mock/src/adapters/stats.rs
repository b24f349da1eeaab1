//! Mock dashboard statistics feed

use async_trait::async_trait;
use tracing::instrument;

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_claims::{DashboardStats, StatsPort};

use crate::config::{simulate, LatencyProfile};
use crate::fixtures;

#[derive(Debug, Clone)]
pub struct MockStatsService {
    stats: DashboardStats,
    latency: LatencyProfile,
}

impl MockStatsService {
    /// Serves the fixed headline figures
    pub fn new(latency: LatencyProfile) -> Self {
        Self::with_stats(fixtures::dashboard_stats(), latency)
    }

    pub fn with_stats(stats: DashboardStats, latency: LatencyProfile) -> Self {
        Self { stats, latency }
    }
}

impl DomainPort for MockStatsService {}

#[async_trait]
impl HealthCheckable for MockStatsService {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy("mock-stats-service")
    }
}

#[async_trait]
impl StatsPort for MockStatsService {
    #[instrument(skip(self))]
    async fn fetch_dashboard_stats(&self) -> Result<DashboardStats, PortError> {
        simulate(self.latency.stats_ms).await;
        Ok(self.stats.clone())
    }
}
