//! Port for issuing registration links.

use async_trait::async_trait;

use crate::domain::{InviteLink, StructureSummary};

use super::define_port_error;

define_port_error! {
    /// Errors raised by invite link adapters.
    pub enum InviteLinkError {
        /// The issuer could not be reached.
        Connection { message: String } =>
            "invite link service unavailable: {message}",
        /// The issuer refused the request.
        Rejected { message: String } =>
            "invite link request rejected: {message}",
    }
}

/// Issues the link new staff follow to register with a structure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InviteLinkIssuer: Send + Sync {
    /// Issue a link for `structure`. Authorisation happens in the caller.
    async fn issue(&self, structure: &StructureSummary) -> Result<InviteLink, InviteLinkError>;
}
