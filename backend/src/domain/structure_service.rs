//! Structure administration: creation with logo upload, listing, invites
//! and quota checks.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::guards::{record_error, require_role, require_structure};
use super::ports::{
    Collection, CreateStructureRequest, CreatedStructure, InviteLinkError, InviteLinkIssuer,
    LogoStorage, LogoStorageError, RecordPorts, StaffRepository, StructureAdmin,
    StructureRepository,
};
use super::{
    Error, InviteLink, LogoUpload, Principal, StaffRole, Structure, StructureDraft, StructureId,
    StructureSummary,
};

fn map_logo_error(error: LogoStorageError) -> Error {
    match error {
        LogoStorageError::Connection { message } => {
            Error::service_unavailable(format!("logo storage unavailable: {message}"))
        }
        LogoStorageError::Rejected { message } => {
            Error::invalid_request(format!("logo upload rejected: {message}"))
        }
    }
}

fn map_invite_error(error: InviteLinkError) -> Error {
    match error {
        InviteLinkError::Connection { message } => {
            Error::service_unavailable(format!("invite link service unavailable: {message}"))
        }
        InviteLinkError::Rejected { message } => {
            Error::internal(format!("invite link generation failed: {message}"))
        }
    }
}

/// Whether the staff attached to `structure` reached `max_users`.
pub async fn staff_quota_exceeded(
    staff: &dyn StaffRepository,
    structure: &Structure,
) -> Result<bool, Error> {
    let attached = staff
        .count_in_structure(&structure.id)
        .await
        .map_err(record_error(Collection::Staff))?;
    Ok(attached >= u64::from(structure.max_users))
}

/// Structure use-cases.
#[derive(Clone)]
pub struct StructureService {
    structures: Arc<dyn StructureRepository>,
    staff: Arc<dyn StaffRepository>,
    logos: Arc<dyn LogoStorage>,
    invites: Arc<dyn InviteLinkIssuer>,
    clock: Arc<dyn Clock>,
}

impl StructureService {
    pub fn new(
        records: &RecordPorts,
        logos: Arc<dyn LogoStorage>,
        invites: Arc<dyn InviteLinkIssuer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            structures: Arc::clone(&records.structures),
            staff: Arc::clone(&records.staff),
            logos,
            invites,
            clock,
        }
    }

    async fn find(&self, id: &StructureId) -> Result<Structure, Error> {
        self.structures
            .find(id)
            .await
            .map_err(record_error(Collection::Structures))?
            .ok_or_else(|| Error::not_found(format!("structure {id} not found")))
    }

    /// Whether `structure` has reached its staff ceiling.
    pub async fn quota_exceeded(&self, structure: &Structure) -> Result<bool, Error> {
        staff_quota_exceeded(self.staff.as_ref(), structure).await
    }

    /// Create the fallback structure when the store holds none.
    ///
    /// Returns the created structure, or `None` when one already existed.
    pub async fn ensure_default_structure(&self) -> Result<Option<Structure>, Error> {
        let existing = self
            .structures
            .count()
            .await
            .map_err(record_error(Collection::Structures))?;
        if existing > 0 {
            return Ok(None);
        }
        let structure = StructureDraft::default_structure().into_structure(
            StructureId::random(),
            None,
            self.clock.utc(),
        );
        self.structures
            .insert(&structure)
            .await
            .map_err(record_error(Collection::Structures))?;
        info!(structure_id = %structure.id, "default structure created");
        Ok(Some(structure))
    }
}

#[async_trait]
impl StructureAdmin for StructureService {
    async fn create_structure(
        &self,
        principal: &Principal,
        request: CreateStructureRequest,
    ) -> Result<CreatedStructure, Error> {
        require_role(principal, StaffRole::SuperAdmin, "creating a structure")?;
        let draft = StructureDraft::try_from_form(request.form)?;
        let logo = LogoUpload::new(&request.logo_content_type, request.logo)?;

        let id = StructureId::random();
        let logo_url = self
            .logos
            .upload(&logo.object_path(&id), logo.format().content_type(), logo.bytes())
            .await
            .map_err(map_logo_error)?;
        let structure = draft.into_structure(id, Some(logo_url), self.clock.utc());
        self.structures
            .insert(&structure)
            .await
            .map_err(record_error(Collection::Structures))?;
        let invite = self
            .invites
            .issue(&StructureSummary::from(&structure))
            .await
            .map_err(map_invite_error)?;

        info!(structure_id = %structure.id, created_by = %principal.id, "structure created");
        Ok(CreatedStructure { structure, invite })
    }

    async fn list_structures(&self, principal: &Principal) -> Result<Vec<Structure>, Error> {
        if principal.is_super_admin() {
            return self
                .structures
                .list()
                .await
                .map_err(record_error(Collection::Structures));
        }
        let own = self
            .structures
            .find(&principal.structure_id)
            .await
            .map_err(record_error(Collection::Structures))?;
        Ok(own.into_iter().collect())
    }

    async fn issue_invite(
        &self,
        principal: &Principal,
        structure: &StructureId,
    ) -> Result<InviteLink, Error> {
        require_role(principal, StaffRole::Admin, "issuing an invite link")?;
        require_structure(principal, structure, "issuing an invite link")?;
        let target = self.find(structure).await?;
        self.invites
            .issue(&StructureSummary::from(&target))
            .await
            .map_err(map_invite_error)
    }
}

#[cfg(test)]
#[path = "structure_service_tests.rs"]
mod tests;
