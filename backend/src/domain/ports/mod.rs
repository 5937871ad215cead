//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe the record store, object storage, hosted auth and
//! invite link issuer the domain relies on. Driving ports are the use-cases
//! inbound adapters call. Every trait exposes typed errors so adapters map
//! their failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod dashboard_query;
mod event_repository;
mod identity_provider;
mod invite_link_issuer;
mod login_service;
mod logo_storage;
mod minor_case_files;
mod minor_repository;
mod note_repository;
mod record_store;
mod registration_command;
mod staff_directory;
mod staff_repository;
mod structure_admin;
mod structure_repository;
mod transcription_repository;

pub use dashboard_query::DashboardQuery;
#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use event_repository::EventRepository;
#[cfg(test)]
pub use event_repository::MockEventRepository;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{
    IdentityProvider, IdentityProviderError, SignUpRequest, StaffMetadataUpdate,
};
#[cfg(test)]
pub use invite_link_issuer::MockInviteLinkIssuer;
pub use invite_link_issuer::{InviteLinkError, InviteLinkIssuer};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{LoginCredentials, LoginService, LoginValidationError};
#[cfg(test)]
pub use logo_storage::MockLogoStorage;
pub use logo_storage::{LogoStorage, LogoStorageError};
pub use minor_case_files::MinorCaseFiles;
#[cfg(test)]
pub use minor_case_files::MockMinorCaseFiles;
#[cfg(test)]
pub use minor_repository::MockMinorRepository;
pub use minor_repository::{MinorQuery, MinorRepository};
#[cfg(test)]
pub use note_repository::MockNoteRepository;
pub use note_repository::NoteRepository;
pub use record_store::{Collection, RecordPorts, RecordStoreError};
#[cfg(test)]
pub use registration_command::MockRegistrationCommand;
pub use registration_command::{RegisteredAccount, RegistrationCommand, RegistrationForm};
#[cfg(test)]
pub use staff_directory::MockStaffDirectory;
pub use staff_directory::StaffDirectory;
#[cfg(test)]
pub use staff_repository::MockStaffRepository;
pub use staff_repository::StaffRepository;
#[cfg(test)]
pub use structure_admin::MockStructureAdmin;
pub use structure_admin::{CreateStructureRequest, CreatedStructure, StructureAdmin};
#[cfg(test)]
pub use structure_repository::MockStructureRepository;
pub use structure_repository::StructureRepository;
#[cfg(test)]
pub use transcription_repository::MockTranscriptionRepository;
pub use transcription_repository::TranscriptionRepository;
