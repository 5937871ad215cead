//! Port for the `structures` collection.

use async_trait::async_trait;

use crate::domain::{Structure, StructureId};

use super::RecordStoreError;

/// Read and write access to structure records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StructureRepository: Send + Sync {
    /// Fetch a structure by identifier.
    async fn find(&self, id: &StructureId) -> Result<Option<Structure>, RecordStoreError>;

    /// Every structure, ordered by name.
    async fn list(&self) -> Result<Vec<Structure>, RecordStoreError>;

    /// Exact number of structures.
    async fn count(&self) -> Result<u64, RecordStoreError>;

    /// Insert a new structure. Identifiers are never reused.
    async fn insert(&self, structure: &Structure) -> Result<(), RecordStoreError>;
}
