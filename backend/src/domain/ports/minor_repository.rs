//! Port for the `jeunes` collection.

use async_trait::async_trait;

use crate::domain::{MinorId, MinorRecord, ScopeFilter};

use super::RecordStoreError;

/// Optional equality filters for [`MinorRepository::list`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinorQuery {
    /// Restrict to complete (`Some(true)`) or incomplete (`Some(false)`) case files.
    pub case_complete: Option<bool>,
}

impl MinorQuery {
    /// Only minors whose case file is still incomplete.
    #[must_use]
    pub const fn incomplete() -> Self {
        Self {
            case_complete: Some(false),
        }
    }
}

/// Read and write access to minor records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MinorRepository: Send + Sync {
    /// Minors visible in `scope` matching `query`, ordered by last name.
    async fn list(
        &self,
        scope: &ScopeFilter,
        query: MinorQuery,
    ) -> Result<Vec<MinorRecord>, RecordStoreError>;

    /// Exact number of minors visible in `scope`.
    async fn count(&self, scope: &ScopeFilter) -> Result<u64, RecordStoreError>;

    /// Fetch a minor by identifier, regardless of scope.
    async fn find(&self, id: &MinorId) -> Result<Option<MinorRecord>, RecordStoreError>;

    /// Insert a new minor.
    async fn insert(&self, minor: &MinorRecord) -> Result<(), RecordStoreError>;

    /// Flag the case file complete. Returns `false` when no record matched.
    async fn mark_case_complete(&self, id: &MinorId) -> Result<bool, RecordStoreError>;
}
