//! Invite links built from a configured public base URL.

use async_trait::async_trait;
use reqwest::Url;

use crate::domain::ports::{InviteLinkError, InviteLinkIssuer};
use crate::domain::{InviteLink, StructureSummary};

/// Issues `{base}/inscription?structure_id={id}` links.
#[derive(Debug, Clone)]
pub struct UrlInviteLinkIssuer {
    base: Url,
}

impl UrlInviteLinkIssuer {
    pub const fn new(base: Url) -> Self {
        Self { base }
    }
}

#[async_trait]
impl InviteLinkIssuer for UrlInviteLinkIssuer {
    async fn issue(&self, structure: &StructureSummary) -> Result<InviteLink, InviteLinkError> {
        InviteLink::build(&self.base, structure.clone())
            .map_err(|error| InviteLinkError::rejected(format!("invalid invite base URL: {error}")))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::StructureId;

    #[tokio::test]
    async fn link_targets_the_registration_page() {
        let base = Url::parse("https://app.gensys.fr/").expect("valid url");
        let issuer = UrlInviteLinkIssuer::new(base);
        let structure = StructureSummary {
            id: StructureId::random(),
            name: "MECS Les Tilleuls".to_owned(),
            city: "Lyon".to_owned(),
        };

        let link = issuer.issue(&structure).await.expect("link issued");

        assert_eq!(
            link.url,
            format!("https://app.gensys.fr/inscription?structure_id={}", structure.id)
        );
        assert_eq!(link.structure, structure);
    }
}
