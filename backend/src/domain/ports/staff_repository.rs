//! Port for the `educateurs` collection.

use async_trait::async_trait;

use crate::domain::{ScopeFilter, StaffId, StaffMember, StaffMode, StaffRole, StructureId};

use super::RecordStoreError;

/// Read and write access to staff records.
///
/// Staff rows are created by the hosted auth backend when an account signs
/// up, so the port exposes no insert.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StaffRepository: Send + Sync {
    /// Staff visible in `scope`, newest first.
    async fn list(&self, scope: &ScopeFilter) -> Result<Vec<StaffMember>, RecordStoreError>;

    /// Fetch a staff member by identifier.
    async fn find(&self, id: &StaffId) -> Result<Option<StaffMember>, RecordStoreError>;

    /// Exact number of staff attached to `structure`.
    async fn count_in_structure(&self, structure: &StructureId) -> Result<u64, RecordStoreError>;

    /// Change a role. Returns `false` when no record matched.
    async fn update_role(&self, id: &StaffId, role: StaffRole) -> Result<bool, RecordStoreError>;

    /// Change an account mode. Returns `false` when no record matched.
    async fn update_mode(&self, id: &StaffId, mode: StaffMode) -> Result<bool, RecordStoreError>;
}
