//! Port for the `evenements` collection.

use async_trait::async_trait;

use crate::domain::{DateWindow, Event, EventKind, MinorId, ScheduledEvent, ScopeFilter};

use super::RecordStoreError;

/// Read access to calendar events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Events in `scope` inside `window` (inclusive), optionally of one
    /// `kind`, joined with the minor's name and ordered by date ascending.
    async fn list_between(
        &self,
        scope: &ScopeFilter,
        window: DateWindow,
        kind: Option<EventKind>,
    ) -> Result<Vec<ScheduledEvent>, RecordStoreError>;

    /// Events for `minor`, ordered by date ascending.
    async fn list_for_minor(&self, minor: &MinorId) -> Result<Vec<Event>, RecordStoreError>;
}
