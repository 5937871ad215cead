//! Port for the `notes` collection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{MinorId, Note, ScopeFilter};

use super::RecordStoreError;

/// Read and write access to follow-up notes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Notes in `scope` created at or after `since`. Head-only exact count.
    async fn count_since(
        &self,
        scope: &ScopeFilter,
        since: DateTime<Utc>,
    ) -> Result<u64, RecordStoreError>;

    /// Notes for `minor` created at or after `since`. Head-only exact count.
    async fn count_for_minor_since(
        &self,
        minor: &MinorId,
        since: DateTime<Utc>,
    ) -> Result<u64, RecordStoreError>;

    /// Notes for `minor`, newest first.
    async fn list_for_minor(&self, minor: &MinorId) -> Result<Vec<Note>, RecordStoreError>;

    /// Insert a new note.
    async fn insert(&self, note: &Note) -> Result<(), RecordStoreError>;
}
