//! Dashboard composition: structure, counters, alerts and upcoming events.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures_util::future::try_join4;
use mockable::Clock;
use serde::Serialize;
use tracing::info;

use super::ports::{Collection, DashboardQuery, EventRepository, RecordPorts, StructureRepository};
use super::{
    AggregationFailed, Alert, AlertAggregator, DashboardStats, DateWindow, Error, FetchFailed,
    ScheduledEvent, ScopeFilter, StatisticsComposer, Structure,
};

/// Days of calendar shown on the dashboard.
pub const UPCOMING_DAYS: i64 = 7;

/// Everything the dashboard renders for one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub structure: Option<Structure>,
    pub stats: DashboardStats,
    pub alerts: Vec<Alert>,
    pub upcoming_events: Vec<ScheduledEvent>,
}

impl DashboardView {
    /// Upcoming events falling on `day`.
    #[must_use]
    pub fn events_on(&self, day: NaiveDate) -> Vec<&ScheduledEvent> {
        self.upcoming_events
            .iter()
            .filter(|scheduled| scheduled.falls_on(day))
            .collect()
    }
}

/// Dashboard read model implementing [`DashboardQuery`].
#[derive(Clone)]
pub struct DashboardService {
    aggregator: AlertAggregator,
    statistics: StatisticsComposer,
    events: Arc<dyn EventRepository>,
    structures: Arc<dyn StructureRepository>,
    clock: Arc<dyn Clock>,
}

impl DashboardService {
    pub fn new(records: &RecordPorts, clock: Arc<dyn Clock>) -> Self {
        Self {
            aggregator: AlertAggregator::new(records, Arc::clone(&clock)),
            statistics: StatisticsComposer::new(records, Arc::clone(&clock)),
            events: Arc::clone(&records.events),
            structures: Arc::clone(&records.structures),
            clock,
        }
    }

    /// Compose the dashboard with a single alert aggregation.
    ///
    /// `stats.alert_count` always equals `alerts.len()`.
    pub async fn compose(&self, scope: &ScopeFilter) -> Result<DashboardView, AggregationFailed> {
        let window = DateWindow::next_days(self.clock.utc(), UPCOMING_DAYS);
        let (alerts, counts, upcoming_events, structure) = try_join4(
            self.aggregator.compute_alerts(scope),
            async { self.statistics.counts(scope).await.map_err(AggregationFailed::from) },
            async {
                self.events
                    .list_between(scope, window, None)
                    .await
                    .map_err(|cause| {
                        AggregationFailed::from(FetchFailed::new(Collection::Events, cause))
                    })
            },
            async {
                self.structures
                    .find(scope.structure_id())
                    .await
                    .map_err(|cause| {
                        AggregationFailed::from(FetchFailed::new(Collection::Structures, cause))
                    })
            },
        )
        .await?;

        let stats = StatisticsComposer::assemble(counts, &alerts);
        info!(
            structure_id = %scope.structure_id(),
            alerts = alerts.len(),
            upcoming = upcoming_events.len(),
            "dashboard composed"
        );
        Ok(DashboardView {
            structure,
            stats,
            alerts,
            upcoming_events,
        })
    }

    pub const fn aggregator(&self) -> &AlertAggregator {
        &self.aggregator
    }
}

#[async_trait]
impl DashboardQuery for DashboardService {
    async fn dashboard(&self, scope: &ScopeFilter) -> Result<DashboardView, Error> {
        self.compose(scope).await.map_err(Error::from)
    }

    async fn alerts(&self, scope: &ScopeFilter) -> Result<Vec<Alert>, Error> {
        self.aggregator.compute_alerts(scope).await.map_err(Error::from)
    }

    async fn stats(&self, scope: &ScopeFilter) -> Result<DashboardStats, Error> {
        self.statistics.compute_stats(scope).await.map_err(Error::from)
    }
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
