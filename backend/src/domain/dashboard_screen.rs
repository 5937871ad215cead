//! Load lifecycle of a dashboard view.
//!
//! A screen owns at most one in-flight load. Starting a new load, or
//! unmounting, aborts the previous one, and a result arriving for a stale
//! ticket is discarded instead of overwriting newer state.

use std::sync::{Mutex, PoisonError};

use chrono::NaiveDate;
use futures_util::future::{AbortHandle, Abortable};
use tracing::debug;

use super::{AggregationFailed, DashboardService, DashboardView, ScheduledEvent, ScopeFilter};

/// What the screen currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState {
    Loading,
    Ready(DashboardView),
    Failed(AggregationFailed),
}

/// Identifies one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Result of driving a load to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result was stored on the screen.
    Applied,
    /// The screen was unmounted or a newer load superseded this one.
    Discarded,
}

#[derive(Debug)]
pub struct DashboardScreen {
    mounted: bool,
    generation: u64,
    in_flight: Option<AbortHandle>,
    state: ScreenState,
    selected_date: NaiveDate,
}

impl DashboardScreen {
    /// A freshly mounted screen, loading, with `today` selected.
    #[must_use]
    pub const fn mount(today: NaiveDate) -> Self {
        Self {
            mounted: true,
            generation: 0,
            in_flight: None,
            state: ScreenState::Loading,
            selected_date: today,
        }
    }

    /// Start a load, aborting any previous one. `None` once unmounted.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if !self.mounted {
            return None;
        }
        self.abort_in_flight();
        self.generation += 1;
        self.state = ScreenState::Loading;
        Some(LoadTicket(self.generation))
    }

    fn attach(&mut self, ticket: LoadTicket, handle: AbortHandle) {
        if self.is_current(ticket) {
            self.in_flight = Some(handle);
        } else {
            handle.abort();
        }
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        self.mounted && ticket.0 == self.generation
    }

    /// Store `result` if `ticket` is still current. Returns whether it was kept.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<DashboardView, AggregationFailed>,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!(ticket = ticket.0, current = self.generation, "discarding stale dashboard load");
            return false;
        }
        self.in_flight = None;
        self.state = match result {
            Ok(view) => ScreenState::Ready(view),
            Err(failure) => ScreenState::Failed(failure),
        };
        true
    }

    /// Stop accepting results and abort the in-flight load.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.abort_in_flight();
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }

    pub fn select_date(&mut self, day: NaiveDate) {
        self.selected_date = day;
    }

    pub const fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub const fn state(&self) -> &ScreenState {
        &self.state
    }

    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Events on the selected day; empty unless the view is ready.
    #[must_use]
    pub fn selected_events(&self) -> Vec<&ScheduledEvent> {
        match &self.state {
            ScreenState::Ready(view) => view.events_on(self.selected_date),
            ScreenState::Loading | ScreenState::Failed(_) => Vec::new(),
        }
    }
}

/// Run one abortable load against `service` and apply it to `screen`.
///
/// The lock is never held across the fetch.
pub async fn load_dashboard(
    screen: &Mutex<DashboardScreen>,
    service: &DashboardService,
    scope: &ScopeFilter,
) -> LoadOutcome {
    let (handle, registration) = AbortHandle::new_pair();
    let ticket = {
        let mut guard = screen.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(ticket) = guard.begin_load() else {
            return LoadOutcome::Discarded;
        };
        guard.attach(ticket, handle);
        ticket
    };

    let Ok(result) = Abortable::new(service.compose(scope), registration).await else {
        debug!("dashboard load aborted");
        return LoadOutcome::Discarded;
    };

    let mut guard = screen.lock().unwrap_or_else(PoisonError::into_inner);
    if guard.complete(ticket, result) {
        LoadOutcome::Applied
    } else {
        LoadOutcome::Discarded
    }
}

#[cfg(test)]
#[path = "dashboard_screen_tests.rs"]
mod tests;
