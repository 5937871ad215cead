//! Authorisation checks and port error mapping shared by the use-case
//! services.

use tracing::info;

use super::ports::{Collection, RecordStoreError};
use super::{Error, Principal, StaffRole, StructureId};

/// Require `principal` to hold at least `required`.
pub fn require_role(principal: &Principal, required: StaffRole, action: &str) -> Result<(), Error> {
    if principal.role >= required {
        return Ok(());
    }
    info!(
        staff_id = %principal.id,
        role = principal.role.as_str(),
        required = required.as_str(),
        action,
        "permission denied"
    );
    Err(Error::forbidden(format!(
        "{action} requires the {} role",
        required.as_str()
    )))
}

/// Require `principal` to manage `structure`: super-admins manage any,
/// everyone else only their own.
pub fn require_structure(
    principal: &Principal,
    structure: &StructureId,
    action: &str,
) -> Result<(), Error> {
    if principal.is_super_admin() || principal.structure_id == *structure {
        return Ok(());
    }
    info!(
        staff_id = %principal.id,
        home = %principal.structure_id,
        target = %structure,
        action,
        "cross-structure access denied"
    );
    Err(Error::forbidden(format!(
        "{action} is limited to your own structure"
    )))
}

/// Map a record-store failure on `collection` to a domain error.
pub fn map_record_error(collection: Collection, error: RecordStoreError) -> Error {
    match error {
        RecordStoreError::Connection { message } => {
            Error::service_unavailable(format!("{collection} store unavailable: {message}"))
        }
        RecordStoreError::Conflict { message } => {
            Error::conflict(format!("{collection} write conflicted: {message}"))
        }
        RecordStoreError::Query { message } | RecordStoreError::Decode { message } => {
            Error::internal(format!("{collection} store error: {message}"))
        }
    }
}

/// Adapter for `map_err` on a port call against `collection`.
pub fn record_error(collection: Collection) -> impl FnOnce(RecordStoreError) -> Error {
    move |error| map_record_error(collection, error)
}
