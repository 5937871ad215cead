//! Driving port for structure administration.

use async_trait::async_trait;

use crate::domain::{Error, InviteLink, Principal, Structure, StructureForm, StructureId};

/// Structure creation request with its raw logo upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStructureRequest {
    pub form: StructureForm,
    pub logo_content_type: String,
    pub logo: Vec<u8>,
}

/// A newly created structure and its registration link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedStructure {
    pub structure: Structure,
    pub invite: InviteLink,
}

/// Structure administration use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StructureAdmin: Send + Sync {
    /// Create a structure (super-admin only).
    async fn create_structure(
        &self,
        principal: &Principal,
        request: CreateStructureRequest,
    ) -> Result<CreatedStructure, Error>;

    /// Structures visible to `principal`, ordered by name.
    async fn list_structures(&self, principal: &Principal) -> Result<Vec<Structure>, Error>;

    /// Issue a registration link for `structure`.
    async fn issue_invite(
        &self,
        principal: &Principal,
        structure: &StructureId,
    ) -> Result<InviteLink, Error>;
}
