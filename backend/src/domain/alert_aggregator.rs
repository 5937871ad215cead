//! Concurrent derivation of dashboard alerts.
//!
//! Three independent groups are fetched in parallel: pending transcriptions,
//! incomplete case files and upcoming deadlines lacking a recent note. Any
//! failed fetch aborts the whole computation; callers never see a partial
//! alert list.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use futures_util::future::{try_join_all, try_join3};
use mockable::Clock;
use tracing::{debug, warn};

use super::ports::{
    Collection, EventRepository, MinorQuery, MinorRepository, NoteRepository, RecordPorts,
    TranscriptionRepository,
};
use super::{AggregationFailed, Alert, DateWindow, EventKind, FetchFailed, ScopeFilter};

/// Days ahead in which a deadline triggers a note check.
pub const DEADLINE_HORIZON_DAYS: i64 = 7;
/// Days back in which a note counts as recent.
pub const NOTE_LOOKBACK_DAYS: i64 = 30;

/// Computes the alert list for a scope.
#[derive(Clone)]
pub struct AlertAggregator {
    transcriptions: Arc<dyn TranscriptionRepository>,
    minors: Arc<dyn MinorRepository>,
    events: Arc<dyn EventRepository>,
    notes: Arc<dyn NoteRepository>,
    clock: Arc<dyn Clock>,
}

impl AlertAggregator {
    pub fn new(records: &RecordPorts, clock: Arc<dyn Clock>) -> Self {
        Self {
            transcriptions: Arc::clone(&records.transcriptions),
            minors: Arc::clone(&records.minors),
            events: Arc::clone(&records.events),
            notes: Arc::clone(&records.notes),
            clock,
        }
    }

    /// Alerts for `scope`, ordered by ascending timestamp.
    ///
    /// Ties keep group order: transcriptions, case files, then notes.
    pub async fn compute_alerts(
        &self,
        scope: &ScopeFilter,
    ) -> Result<Vec<Alert>, AggregationFailed> {
        let now = self.clock.utc();
        let (pending, incomplete, note_due) = try_join3(
            self.pending_transcription_alerts(scope),
            self.case_incomplete_alerts(scope, now),
            self.note_due_alerts(scope, now),
        )
        .await
        .map_err(|failure| {
            warn!(
                collection = %failure.collection,
                error = %failure.cause,
                structure_id = %scope.structure_id(),
                "alert aggregation aborted"
            );
            AggregationFailed::from(failure)
        })?;

        let mut alerts = Vec::with_capacity(pending.len() + incomplete.len() + note_due.len());
        alerts.extend(pending);
        alerts.extend(incomplete);
        alerts.extend(note_due);
        alerts.sort_by_key(|alert| alert.at);
        debug!(count = alerts.len(), structure_id = %scope.structure_id(), "alerts computed");
        Ok(alerts)
    }

    async fn pending_transcription_alerts(
        &self,
        scope: &ScopeFilter,
    ) -> Result<Vec<Alert>, FetchFailed> {
        let pending = self
            .transcriptions
            .list_pending(scope)
            .await
            .map_err(FetchFailed::from_store(Collection::Transcriptions))?;
        Ok(pending
            .iter()
            .map(|item| Alert::transcription_pending(&item.transcription, &item.minor))
            .collect())
    }

    async fn case_incomplete_alerts(
        &self,
        scope: &ScopeFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<Alert>, FetchFailed> {
        let minors = self
            .minors
            .list(scope, MinorQuery::incomplete())
            .await
            .map_err(FetchFailed::from_store(Collection::Minors))?;
        Ok(minors
            .iter()
            .filter(|minor| !minor.case_complete)
            .map(|minor| Alert::case_incomplete(minor, now))
            .collect())
    }

    async fn note_due_alerts(
        &self,
        scope: &ScopeFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<Alert>, FetchFailed> {
        let window = DateWindow::next_days(now, DEADLINE_HORIZON_DAYS);
        let deadlines = self
            .events
            .list_between(scope, window, Some(EventKind::Deadline))
            .await
            .map_err(FetchFailed::from_store(Collection::Events))?;
        let since = now - Duration::days(NOTE_LOOKBACK_DAYS);

        let checks = deadlines.iter().map(|scheduled| async move {
            let recent = self
                .notes
                .count_for_minor_since(&scheduled.event.minor_id, since)
                .await
                .map_err(FetchFailed::from_store(Collection::Notes))?;
            Ok::<_, FetchFailed>(
                (recent == 0).then(|| Alert::note_due(&scheduled.event, &scheduled.minor)),
            )
        });
        let alerts = try_join_all(checks).await?;
        Ok(alerts.into_iter().flatten().collect())
    }
}

#[cfg(test)]
#[path = "alert_aggregator_tests.rs"]
mod tests;
