//! Driving port for invite-based registration.

use async_trait::async_trait;

use crate::domain::{Error, StaffId, StructureId, StructureSummary};

/// Registration form submitted from an invite link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    pub structure_id: StructureId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub accepted_terms: bool,
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredAccount {
    pub staff_id: StaffId,
    pub structure: StructureSummary,
}

/// Registration use-cases; both are public.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Resolve the structure named by an invite link.
    async fn lookup_invite(&self, structure: &StructureId) -> Result<StructureSummary, Error>;

    /// Create an educator account attached to the invited structure.
    async fn register(&self, form: RegistrationForm) -> Result<RegisteredAccount, Error>;
}
