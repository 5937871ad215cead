//! Dashboard counters.

use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveTime, Utc};
use futures_util::future::try_join;
use mockable::Clock;

use super::ports::{Collection, MinorRepository, NoteRepository, RecordPorts};
use super::{AggregationFailed, Alert, AlertAggregator, DashboardStats, FetchFailed, ScopeFilter};

/// Record counts shared by the stats and dashboard compositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordCounts {
    pub minors: u64,
    pub notes_this_year: u64,
}

/// First instant of the calendar year containing `now`, in UTC.
#[must_use]
pub fn year_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .with_ordinal(1)
        .map_or(now, |day| day.and_time(NaiveTime::MIN).and_utc())
}

/// Composes [`DashboardStats`] from counts and alerts.
#[derive(Clone)]
pub struct StatisticsComposer {
    minors: Arc<dyn MinorRepository>,
    notes: Arc<dyn NoteRepository>,
    aggregator: AlertAggregator,
    clock: Arc<dyn Clock>,
}

impl StatisticsComposer {
    pub fn new(records: &RecordPorts, clock: Arc<dyn Clock>) -> Self {
        Self {
            minors: Arc::clone(&records.minors),
            notes: Arc::clone(&records.notes),
            aggregator: AlertAggregator::new(records, Arc::clone(&clock)),
            clock,
        }
    }

    /// Minors in scope and notes created since January 1st.
    pub async fn counts(&self, scope: &ScopeFilter) -> Result<RecordCounts, FetchFailed> {
        let since = year_start(self.clock.utc());
        let (minors, notes_this_year) = try_join(
            async {
                self.minors
                    .count(scope)
                    .await
                    .map_err(FetchFailed::from_store(Collection::Minors))
            },
            async {
                self.notes
                    .count_since(scope, since)
                    .await
                    .map_err(FetchFailed::from_store(Collection::Notes))
            },
        )
        .await?;
        Ok(RecordCounts {
            minors,
            notes_this_year,
        })
    }

    /// Standalone stats: counts plus a fresh alert aggregation.
    pub async fn compute_stats(
        &self,
        scope: &ScopeFilter,
    ) -> Result<DashboardStats, AggregationFailed> {
        let (counts, alerts) = try_join(
            async { self.counts(scope).await.map_err(AggregationFailed::from) },
            self.aggregator.compute_alerts(scope),
        )
        .await?;
        Ok(Self::assemble(counts, &alerts))
    }

    /// Stats reusing an alert list already computed for the same scope.
    pub async fn compute_with_alerts(
        &self,
        scope: &ScopeFilter,
        alerts: &[Alert],
    ) -> Result<DashboardStats, AggregationFailed> {
        let counts = self.counts(scope).await?;
        Ok(Self::assemble(counts, alerts))
    }

    #[must_use]
    pub fn assemble(counts: RecordCounts, alerts: &[Alert]) -> DashboardStats {
        DashboardStats {
            minor_count: counts.minors,
            note_count: counts.notes_this_year,
            alert_count: alerts.len() as u64,
        }
    }
}
