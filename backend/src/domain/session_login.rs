//! Credential login producing a session [`Principal`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::guards::record_error;
use super::ports::{
    Collection, IdentityProvider, IdentityProviderError, LoginCredentials, LoginService,
    StaffRepository,
};
use super::{Error, Principal};

fn map_sign_in_error(error: IdentityProviderError) -> Error {
    match error {
        IdentityProviderError::InvalidCredentials => Error::unauthorized("invalid credentials"),
        IdentityProviderError::Connection { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
        other => Error::internal(format!("identity provider error: {other}")),
    }
}

/// Verifies credentials with the identity provider, then loads the staff
/// record carrying role and structure.
#[derive(Clone)]
pub struct SessionLoginService {
    identity: Arc<dyn IdentityProvider>,
    staff: Arc<dyn StaffRepository>,
}

impl SessionLoginService {
    pub fn new(identity: Arc<dyn IdentityProvider>, staff: Arc<dyn StaffRepository>) -> Self {
        Self { identity, staff }
    }
}

#[async_trait]
impl LoginService for SessionLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        let id = self
            .identity
            .sign_in(credentials.email(), credentials.password())
            .await
            .map_err(map_sign_in_error)?;
        let Some(member) = self
            .staff
            .find(&id)
            .await
            .map_err(record_error(Collection::Staff))?
        else {
            warn!(staff_id = %id, "authenticated account has no staff record");
            return Err(Error::unauthorized("account is not attached to a structure"));
        };
        info!(staff_id = %member.id, role = member.role.as_str(), "staff member signed in");
        Ok(Principal::from(&member))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockIdentityProvider, MockStaffRepository};
    use crate::domain::service_test_support::staff_member;
    use crate::domain::{ErrorCode, StaffRole, StructureId};

    fn credentials() -> LoginCredentials {
        LoginCredentials::try_from_parts(" Sam@MECS.fr ", "password").expect("valid credentials")
    }

    #[tokio::test]
    async fn successful_login_yields_the_staff_principal() {
        let member = staff_member(StaffRole::Admin, StructureId::random());
        let id = member.id;
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_sign_in()
            .withf(|email, _| email == "sam@mecs.fr")
            .return_once(move |_, _| Ok(id));
        let mut staff = MockStaffRepository::new();
        staff.expect_find().return_once(move |_| Ok(Some(member)));

        let principal = SessionLoginService::new(Arc::new(identity), Arc::new(staff))
            .authenticate(&credentials())
            .await
            .expect("login succeeds");

        assert_eq!(principal.id, id);
        assert_eq!(principal.role, StaffRole::Admin);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorised() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_sign_in()
            .return_once(|_, _| Err(IdentityProviderError::invalid_credentials()));
        let mut staff = MockStaffRepository::new();
        staff.expect_find().times(0);

        let error = SessionLoginService::new(Arc::new(identity), Arc::new(staff))
            .authenticate(&credentials())
            .await
            .expect_err("login fails");

        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn account_without_staff_record_is_unauthorised() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_sign_in()
            .return_once(|_, _| Ok(crate::domain::StaffId::random()));
        let mut staff = MockStaffRepository::new();
        staff.expect_find().return_once(|_| Ok(None));

        let error = SessionLoginService::new(Arc::new(identity), Arc::new(staff))
            .authenticate(&credentials())
            .await
            .expect_err("login fails");

        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }
}
