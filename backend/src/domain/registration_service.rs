//! Invite-based staff registration.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::form_rules::{self, FieldError};
use super::guards::record_error;
use super::ports::{
    Collection, IdentityProvider, IdentityProviderError, RecordPorts, RegisteredAccount,
    RegistrationCommand, RegistrationForm, SignUpRequest, StaffRepository, StructureRepository,
};
use super::structure_service::staff_quota_exceeded;
use super::{Error, StaffRole, Structure, StructureId, StructureSummary};

const MIN_PASSWORD_CHARS: usize = 8;

fn map_identity_error(error: IdentityProviderError) -> Error {
    match error {
        IdentityProviderError::Connection { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
        IdentityProviderError::AlreadyRegistered { email } => {
            Error::conflict(format!("an account already exists for {email}"))
        }
        IdentityProviderError::Rejected { message } => {
            Error::invalid_request(format!("registration rejected: {message}"))
        }
        IdentityProviderError::InvalidCredentials => {
            Error::internal("identity provider refused the sign-up credentials")
        }
    }
}

fn password(field: &'static str, value: &str) -> Result<(), FieldError> {
    if value.chars().count() < MIN_PASSWORD_CHARS {
        return Err(FieldError::new(
            field,
            "too_short",
            format!("{field} must contain at least {MIN_PASSWORD_CHARS} characters"),
        ));
    }
    Ok(())
}

/// Validate a registration form into an identity-provider request.
///
/// The role is always `educateur`.
pub fn validate_registration(form: &RegistrationForm) -> Result<SignUpRequest, FieldError> {
    let first_name = form_rules::min_chars("prenom", &form.first_name, 2)?;
    let last_name = form_rules::min_chars("nom", &form.last_name, 2)?;
    let email = form_rules::email("email", &form.email)?;
    password("password", &form.password)?;
    password("passwordConfirmation", &form.password_confirmation)?;
    if form.password != form.password_confirmation {
        return Err(FieldError::new(
            "passwordConfirmation",
            "mismatch",
            "passwords do not match",
        ));
    }
    if !form.accepted_terms {
        return Err(FieldError::new(
            "acceptedTerms",
            "required",
            "the terms of use must be accepted",
        ));
    }
    Ok(SignUpRequest {
        email,
        password: form.password.clone(),
        first_name,
        last_name,
        structure_id: form.structure_id,
        role: StaffRole::Educator,
    })
}

/// Registration use-cases.
#[derive(Clone)]
pub struct RegistrationService {
    structures: Arc<dyn StructureRepository>,
    staff: Arc<dyn StaffRepository>,
    identity: Arc<dyn IdentityProvider>,
}

impl RegistrationService {
    pub fn new(records: &RecordPorts, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            structures: Arc::clone(&records.structures),
            staff: Arc::clone(&records.staff),
            identity,
        }
    }

    async fn invited_structure(&self, id: &StructureId) -> Result<Structure, Error> {
        self.structures
            .find(id)
            .await
            .map_err(record_error(Collection::Structures))?
            .ok_or_else(|| Error::not_found("invalid invitation link"))
    }
}

#[async_trait]
impl RegistrationCommand for RegistrationService {
    async fn lookup_invite(&self, structure: &StructureId) -> Result<StructureSummary, Error> {
        let found = self.invited_structure(structure).await?;
        Ok(StructureSummary::from(&found))
    }

    async fn register(&self, form: RegistrationForm) -> Result<RegisteredAccount, Error> {
        let request = validate_registration(&form)?;
        let structure = self.invited_structure(&request.structure_id).await?;
        if staff_quota_exceeded(self.staff.as_ref(), &structure).await? {
            info!(
                structure_id = %structure.id,
                max_users = structure.max_users,
                "registration refused: quota reached"
            );
            return Err(Error::conflict(format!(
                "{} has reached its limit of {} users",
                structure.name, structure.max_users
            )));
        }
        let staff_id = self.identity.sign_up(&request).await.map_err(map_identity_error)?;
        info!(%staff_id, structure_id = %structure.id, "staff member registered");
        Ok(RegisteredAccount {
            staff_id,
            structure: StructureSummary::from(&structure),
        })
    }
}

#[cfg(test)]
#[path = "registration_service_tests.rs"]
mod tests;
