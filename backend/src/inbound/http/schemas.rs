//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers below mirror their serialised shape and register under the
//! domain type's path via `#[schema(as = ...)]`.

#![expect(
    dead_code,
    reason = "Schema wrappers exist only for OpenAPI generation via utoipa"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "forbidden")]
    Forbidden,
    #[schema(rename = "not_found")]
    NotFound,
    /// A write clashed with existing data or a quota.
    #[schema(rename = "conflict")]
    Conflict,
    /// A remote collection could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "Something went wrong")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "01HZY8B2W6X5Y7Z9ABCD1234")]
    trace_id: Option<String>,
    /// Field-level detail such as `{"field": "nom", "code": "too_short"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Principal`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Principal)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    email: String,
    display_name: String,
    #[schema(example = "educateur")]
    role: String,
    #[schema(value_type = String, format = Uuid)]
    structure_id: String,
}

/// OpenAPI schema for [`crate::domain::Alert`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Alert)]
#[serde(rename_all = "camelCase")]
pub struct AlertSchema {
    #[schema(example = "dossier-3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    title: String,
    description: String,
    /// `transcription`, `dossier` or `note`.
    kind: String,
    at: chrono::DateTime<chrono::Utc>,
    #[schema(example = "/mes-jeunes/3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    link: String,
    #[schema(value_type = String, format = Uuid)]
    minor_id: String,
    #[schema(value_type = String, format = Uuid)]
    structure_id: String,
}

/// OpenAPI schema for [`crate::domain::DashboardStats`].
#[derive(ToSchema)]
#[schema(as = crate::domain::DashboardStats)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsSchema {
    minor_count: u64,
    /// Notes created since 1 January of the current year.
    note_count: u64,
    alert_count: u64,
}

/// OpenAPI schema for [`crate::domain::Structure`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Structure)]
#[serde(rename_all = "camelCase")]
pub struct StructureSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    name: String,
    #[serde(rename = "type")]
    #[schema(example = "MECS")]
    structure_type: String,
    city: String,
    logo_url: Option<String>,
    max_users: u32,
    email: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

/// OpenAPI schema for [`crate::domain::StructureSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::StructureSummary)]
pub struct StructureSummarySchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    name: String,
    city: String,
}

/// OpenAPI schema for [`crate::domain::InviteLink`].
#[derive(ToSchema)]
#[schema(as = crate::domain::InviteLink)]
pub struct InviteLinkSchema {
    #[schema(example = "https://app.gensys.fr/inscription?structure_id=3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    url: String,
    structure: StructureSummarySchema,
}

/// OpenAPI schema for [`crate::domain::StaffMember`].
#[derive(ToSchema)]
#[schema(as = crate::domain::StaffMember)]
#[serde(rename_all = "camelCase")]
pub struct StaffMemberSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    email: String,
    first_name: String,
    last_name: String,
    #[schema(value_type = String, format = Uuid)]
    structure_id: String,
    #[schema(example = "admin")]
    role: String,
    #[schema(example = "normal")]
    mode: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

/// OpenAPI schema for [`crate::domain::MinorRecord`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MinorRecord)]
#[serde(rename_all = "camelCase")]
pub struct MinorRecordSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    first_name: String,
    last_name: String,
    birth_date: chrono::NaiveDate,
    #[schema(value_type = String, format = Uuid)]
    structure_id: String,
    case_complete: bool,
    categories: Vec<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

/// OpenAPI schema for [`crate::domain::Note`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Note)]
#[serde(rename_all = "camelCase")]
pub struct NoteSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    title: String,
    body: String,
    created_at: chrono::DateTime<chrono::Utc>,
    #[schema(value_type = String, format = Uuid)]
    minor_id: String,
    #[schema(value_type = String, format = Uuid)]
    author_id: String,
    #[schema(value_type = String, format = Uuid)]
    structure_id: String,
}

/// OpenAPI schema for [`crate::domain::Transcription`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Transcription)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    body: String,
    interviewed_at: chrono::DateTime<chrono::Utc>,
    validated: bool,
    #[schema(value_type = String, format = Uuid)]
    minor_id: String,
    #[schema(value_type = String, format = Uuid)]
    author_id: String,
    #[schema(value_type = String, format = Uuid)]
    structure_id: String,
}

/// OpenAPI schema for [`crate::domain::Event`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Event)]
#[serde(rename_all = "camelCase")]
pub struct EventSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    title: String,
    description: String,
    at: chrono::DateTime<chrono::Utc>,
    /// `rdv`, `anniversaire`, `echeance` or `autre`.
    kind: String,
    #[schema(value_type = String, format = Uuid)]
    minor_id: String,
    #[schema(value_type = String, format = Uuid)]
    structure_id: String,
}

/// OpenAPI schema for [`crate::domain::DashboardView`].
#[derive(ToSchema)]
#[schema(as = crate::domain::DashboardView)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViewSchema {
    structure: Option<StructureSchema>,
    stats: DashboardStatsSchema,
    alerts: Vec<AlertSchema>,
    /// Events of the next seven days, each carrying its minor's name.
    upcoming_events: Vec<serde_json::Value>,
}
