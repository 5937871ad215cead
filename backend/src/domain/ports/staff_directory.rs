//! Driving port for the staff directory.

use async_trait::async_trait;

use crate::domain::{Error, Principal, StaffId, StaffListFilter, StaffMember, StaffMode, StaffRole};

/// Staff listing and management use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StaffDirectory: Send + Sync {
    /// Staff visible to `principal` matching `filter`, newest first.
    async fn list_staff(
        &self,
        principal: &Principal,
        filter: StaffListFilter,
    ) -> Result<Vec<StaffMember>, Error>;

    /// Change a staff member's role.
    async fn update_role(
        &self,
        principal: &Principal,
        staff: &StaffId,
        role: StaffRole,
    ) -> Result<StaffMember, Error>;

    /// Change a staff member's account mode.
    async fn update_mode(
        &self,
        principal: &Principal,
        staff: &StaffId,
        mode: StaffMode,
    ) -> Result<StaffMember, Error>;

    /// Delete a staff account.
    async fn delete_staff(&self, principal: &Principal, staff: &StaffId) -> Result<(), Error>;
}
