//! Port for the hosted authentication service.

use async_trait::async_trait;

use crate::domain::{StaffId, StaffMode, StaffRole, StructureId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// The auth service could not be reached.
        Connection { message: String } =>
            "identity provider connection failed: {message}",
        /// Email and password did not match an account.
        InvalidCredentials =>
            "invalid email or password",
        /// An account already exists for the email address.
        AlreadyRegistered { email: String } =>
            "an account already exists for {email}",
        /// The auth service rejected the request.
        Rejected { message: String } =>
            "identity provider rejected the request: {message}",
    }
}

/// Account creation request with the metadata copied onto the staff row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub structure_id: StructureId,
    pub role: StaffRole,
}

/// Metadata fields mirrored on the auth account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaffMetadataUpdate {
    pub role: Option<StaffRole>,
    pub mode: Option<StaffMode>,
}

/// Hosted authentication operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account and return its identifier.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<StaffId, IdentityProviderError>;

    /// Verify credentials and return the account identifier.
    async fn sign_in(&self, email: &str, password: &str) -> Result<StaffId, IdentityProviderError>;

    /// Mirror role or mode changes onto the account metadata.
    async fn update_metadata(
        &self,
        id: &StaffId,
        update: StaffMetadataUpdate,
    ) -> Result<(), IdentityProviderError>;

    /// Remove the account; the staff row follows through the store's cascade.
    async fn delete_user(&self, id: &StaffId) -> Result<(), IdentityProviderError>;
}
