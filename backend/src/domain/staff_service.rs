//! Staff directory: listing, role and mode changes, removal.
//!
//! Role and mode changes are written to the staff record first and then
//! mirrored to the identity provider. A failure at either step is returned
//! as is; nothing is rolled back.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::guards::{record_error, require_role, require_structure};
use super::ports::{
    Collection, IdentityProvider, IdentityProviderError, RecordPorts, StaffDirectory,
    StaffMetadataUpdate, StaffRepository,
};
use super::{
    Error, ListFilter, Principal, ScopeFilter, StaffId, StaffListFilter, StaffMember, StaffMode,
    StaffRole,
};

fn map_identity_error(error: IdentityProviderError) -> Error {
    match error {
        IdentityProviderError::Connection { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
        other => Error::internal(format!("identity provider error: {other}")),
    }
}

/// Staff directory use-cases.
#[derive(Clone)]
pub struct StaffService {
    staff: Arc<dyn StaffRepository>,
    identity: Arc<dyn IdentityProvider>,
}

impl StaffService {
    pub fn new(records: &RecordPorts, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            staff: Arc::clone(&records.staff),
            identity,
        }
    }

    /// Load `target` and check `principal` may manage it.
    async fn managed_member(
        &self,
        principal: &Principal,
        target: &StaffId,
        action: &str,
    ) -> Result<StaffMember, Error> {
        require_role(principal, StaffRole::Admin, action)?;
        let member = self
            .staff
            .find(target)
            .await
            .map_err(record_error(Collection::Staff))?
            .ok_or_else(|| Error::not_found(format!("staff member {target} not found")))?;
        require_structure(principal, &member.structure_id, action)?;
        if member.role == StaffRole::SuperAdmin && !principal.is_super_admin() {
            return Err(Error::forbidden(format!(
                "{action} on a super_admin account requires the super_admin role"
            )));
        }
        Ok(member)
    }

    async fn mirror(&self, id: &StaffId, update: StaffMetadataUpdate) -> Result<(), Error> {
        self.identity
            .update_metadata(id, update)
            .await
            .map_err(map_identity_error)
    }
}

fn missing(id: &StaffId) -> Error {
    Error::not_found(format!("staff member {id} not found"))
}

#[async_trait]
impl StaffDirectory for StaffService {
    async fn list_staff(
        &self,
        principal: &Principal,
        filter: StaffListFilter,
    ) -> Result<Vec<StaffMember>, Error> {
        let members = self
            .staff
            .list(&ScopeFilter::for_principal(principal))
            .await
            .map_err(record_error(Collection::Staff))?;
        let filter = ListFilter::with_current(StaffListFilter::default(), filter);
        Ok(filter
            .apply(&members, StaffListFilter::matches)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn update_role(
        &self,
        principal: &Principal,
        staff: &StaffId,
        role: StaffRole,
    ) -> Result<StaffMember, Error> {
        let mut member = self.managed_member(principal, staff, "changing a role").await?;
        if role == StaffRole::SuperAdmin && !principal.is_super_admin() {
            return Err(Error::forbidden(
                "granting super_admin requires the super_admin role",
            ));
        }
        if !self
            .staff
            .update_role(staff, role)
            .await
            .map_err(record_error(Collection::Staff))?
        {
            return Err(missing(staff));
        }
        self.mirror(
            staff,
            StaffMetadataUpdate {
                role: Some(role),
                mode: None,
            },
        )
        .await?;
        info!(
            staff_id = %staff,
            role = role.as_str(),
            changed_by = %principal.id,
            "staff role updated"
        );
        member.role = role;
        Ok(member)
    }

    async fn update_mode(
        &self,
        principal: &Principal,
        staff: &StaffId,
        mode: StaffMode,
    ) -> Result<StaffMember, Error> {
        let mut member = self.managed_member(principal, staff, "changing an account mode").await?;
        if !self
            .staff
            .update_mode(staff, mode)
            .await
            .map_err(record_error(Collection::Staff))?
        {
            return Err(missing(staff));
        }
        self.mirror(
            staff,
            StaffMetadataUpdate {
                role: None,
                mode: Some(mode),
            },
        )
        .await?;
        info!(
            staff_id = %staff,
            mode = mode.as_str(),
            changed_by = %principal.id,
            "staff mode updated"
        );
        member.mode = Some(mode);
        Ok(member)
    }

    async fn delete_staff(&self, principal: &Principal, staff: &StaffId) -> Result<(), Error> {
        self.managed_member(principal, staff, "removing a staff member").await?;
        self.identity.delete_user(staff).await.map_err(map_identity_error)?;
        info!(staff_id = %staff, removed_by = %principal.id, "staff member removed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "staff_service_tests.rs"]
mod tests;
