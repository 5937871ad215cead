//! Domain primitives, aggregates and use-case services.
//!
//! Purpose: model the child-protection console (structures, staff, minors
//! and their case records), derive dashboard alerts and statistics, and
//! enforce role and structure scoping. Nothing here knows about HTTP or the
//! hosted backend; adapters reach the domain through [`ports`].
//!
//! Public surface:
//! - [`Error`]: error payload returned by every use-case.
//! - [`ScopeFilter`]: visibility restriction derived from a principal.
//! - [`AlertAggregator`], [`StatisticsComposer`], [`DashboardService`]: the
//!   dashboard read model.
//! - [`StructureService`], [`RegistrationService`], [`StaffService`],
//!   [`MinorService`], [`SessionLoginService`]: driving port implementations.

pub mod error;
pub mod form_rules;
pub mod ports;

mod aggregation_error;
mod alert;
mod alert_aggregator;
mod case_records;
mod dashboard;
mod dashboard_screen;
mod guards;
mod ids;
mod list_filter;
mod minor;
mod minor_service;
mod navigation;
mod registration_service;
mod scope;
mod session_login;
mod staff;
mod staff_service;
mod statistics;
mod structure;
mod structure_service;
mod trace_id;

#[cfg(test)]
pub(crate) mod service_test_support;

pub use self::aggregation_error::{AggregationFailed, FetchFailed};
pub use self::alert::{Alert, AlertKind, AlertLink, DashboardStats};
pub use self::alert_aggregator::{AlertAggregator, DEADLINE_HORIZON_DAYS, NOTE_LOOKBACK_DAYS};
pub use self::case_records::{
    DateWindow, Event, EventKind, Note, NoteForm, PendingTranscription, ScheduledEvent,
    Transcription, TranscriptionForm,
};
pub use self::dashboard::{DashboardService, DashboardView, UPCOMING_DAYS};
pub use self::dashboard_screen::{
    DashboardScreen, LoadOutcome, LoadTicket, ScreenState, load_dashboard,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::form_rules::FieldError;
pub use self::ids::{
    EventId, MinorId, NoteId, RecordIdValidationError, StaffId, StructureId, TranscriptionId,
};
pub use self::list_filter::{
    CaseStatus, FilterState, ListFilter, MinorListFilter, StaffListFilter,
};
pub use self::minor::{CaseCategory, MinorDraft, MinorForm, MinorRecord, PersonName};
pub use self::minor_service::MinorService;
pub use self::navigation::{
    AppRoute, AuthState, FALLBACK_PATH, GuardDecision, RouteAccess, RouteMatch, SIGN_IN_PATH,
    guard, navigate, resolve_path,
};
pub use self::registration_service::{RegistrationService, validate_registration};
pub use self::scope::{PermissionLevel, ScopeFilter};
pub use self::session_login::SessionLoginService;
pub use self::staff::{Principal, StaffMember, StaffMode, StaffRole};
pub use self::staff_service::StaffService;
pub use self::statistics::{RecordCounts, StatisticsComposer, year_start};
pub use self::structure::{
    InviteLink, LogoFormat, LogoUpload, MAX_USERS_CEILING, Structure, StructureDraft,
    StructureForm, StructureSummary, StructureType, USER_LIMIT_PRESETS,
};
pub use self::structure_service::{StructureService, staff_quota_exceeded};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use gensys_console::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
