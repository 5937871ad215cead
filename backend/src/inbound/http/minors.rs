//! Minors' case-file endpoints.
//!
//! ```text
//! GET  /api/v1/jeunes?search=&category=&entryDate=&status=
//! POST /api/v1/jeunes
//! GET  /api/v1/jeunes/{id}
//! POST /api/v1/jeunes/{id}/complete
//! GET  /api/v1/jeunes/{id}/notes
//! POST /api/v1/jeunes/{id}/notes
//! GET  /api/v1/jeunes/{id}/transcriptions
//! POST /api/v1/jeunes/{id}/transcriptions
//! POST /api/v1/jeunes/{id}/transcriptions/{transcriptionId}/validate
//! GET  /api/v1/jeunes/{id}/evenements
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    CaseCategory, CaseStatus, Error, Event, MinorForm, MinorId, MinorListFilter, MinorRecord,
    Note, NoteForm, Transcription, TranscriptionForm, TranscriptionId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    ErrorSchema, EventSchema, MinorRecordSchema, NoteSchema, TranscriptionSchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_id, parse_optional_date, parse_optional_id, parse_rfc3339_timestamp,
};

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct MinorListParams {
    /// Case-insensitive match on the full name.
    pub search: Option<String>,
    /// Case category tag, e.g. `médical`.
    pub category: Option<String>,
    /// Creation day, `YYYY-MM-DD`.
    pub entry_date: Option<String>,
    /// `complet` or `incomplet`.
    #[param(value_type = Option<String>)]
    pub status: Option<CaseStatus>,
}

impl MinorListParams {
    fn into_filter(self) -> Result<MinorListFilter, Error> {
        let category = self
            .category
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(CaseCategory::parse)
            .transpose()?;
        Ok(MinorListFilter {
            search: self.search.unwrap_or_default(),
            category,
            entry_date: parse_optional_date(
                self.entry_date.as_deref(),
                FieldName::new("entryDate"),
            )?,
            status: self.status,
        })
    }
}

/// Request body for `POST /api/v1/jeunes`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMinorBody {
    #[serde(alias = "prenom")]
    pub first_name: String,
    #[serde(alias = "nom")]
    pub last_name: String,
    /// `YYYY-MM-DD`.
    pub birth_date: Option<String>,
    /// Honoured for super-admins only.
    pub structure_id: Option<String>,
    #[serde(default, alias = "dossiers")]
    pub categories: Vec<String>,
}

impl CreateMinorBody {
    fn into_form(self) -> Result<MinorForm, Error> {
        Ok(MinorForm {
            birth_date: parse_optional_date(
                self.birth_date.as_deref(),
                FieldName::new("birthDate"),
            )?,
            structure_id: parse_optional_id(
                self.structure_id.as_deref(),
                FieldName::new("structureId"),
            )?,
            first_name: self.first_name,
            last_name: self.last_name,
            categories: self.categories,
        })
    }
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct NoteBody {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionBody {
    pub body: String,
    /// RFC 3339 timestamp of the interview.
    pub interviewed_at: String,
}

fn minor_id(raw: &str) -> Result<MinorId, Error> {
    parse_id(raw, FieldName::new("id"))
}

/// Minors visible to the caller, filtered.
#[utoipa::path(
    get,
    path = "/api/v1/jeunes",
    params(MinorListParams),
    responses(
        (status = 200, description = "Minors", body = [MinorRecordSchema]),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["minors"],
    operation_id = "listMinors"
)]
#[get("/jeunes")]
pub async fn list_minors(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<MinorListParams>,
) -> ApiResult<web::Json<Vec<MinorRecord>>> {
    let principal = session.require_principal()?;
    let filter = params.into_inner().into_filter()?;
    state.minors.list_minors(&principal, filter).await.map(web::Json)
}

/// Open a case file.
#[utoipa::path(
    post,
    path = "/api/v1/jeunes",
    request_body = CreateMinorBody,
    responses(
        (status = 201, description = "Created", body = MinorRecordSchema),
        (status = 400, description = "Invalid form", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["minors"],
    operation_id = "createMinor"
)]
#[post("/jeunes")]
pub async fn create_minor(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateMinorBody>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let form = payload.into_inner().into_form()?;
    let minor = state.minors.create_minor(&principal, form).await?;
    Ok(HttpResponse::Created().json(minor))
}

#[utoipa::path(
    get,
    path = "/api/v1/jeunes/{id}",
    params(("id" = String, Path, description = "Minor identifier")),
    responses(
        (status = 200, description = "Minor", body = MinorRecordSchema),
        (status = 404, description = "Unknown or out of scope", body = ErrorSchema)
    ),
    tags = ["minors"],
    operation_id = "getMinor"
)]
#[get("/jeunes/{id}")]
pub async fn get_minor(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MinorRecord>> {
    let principal = session.require_principal()?;
    let id = minor_id(&path)?;
    state.minors.get_minor(&principal, &id).await.map(web::Json)
}

/// Flag the case file complete.
#[utoipa::path(
    post,
    path = "/api/v1/jeunes/{id}/complete",
    params(("id" = String, Path, description = "Minor identifier")),
    responses(
        (status = 200, description = "Updated minor", body = MinorRecordSchema),
        (status = 404, description = "Unknown or out of scope", body = ErrorSchema)
    ),
    tags = ["minors"],
    operation_id = "completeCaseFile"
)]
#[post("/jeunes/{id}/complete")]
pub async fn mark_case_complete(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MinorRecord>> {
    let principal = session.require_principal()?;
    let id = minor_id(&path)?;
    state
        .minors
        .mark_case_complete(&principal, &id)
        .await
        .map(web::Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/jeunes/{id}/notes",
    params(("id" = String, Path, description = "Minor identifier")),
    responses(
        (status = 200, description = "Notes, newest first", body = [NoteSchema]),
        (status = 404, description = "Unknown or out of scope", body = ErrorSchema)
    ),
    tags = ["minors"],
    operation_id = "listNotes"
)]
#[get("/jeunes/{id}/notes")]
pub async fn list_notes(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Note>>> {
    let principal = session.require_principal()?;
    let id = minor_id(&path)?;
    state.minors.notes(&principal, &id).await.map(web::Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/jeunes/{id}/notes",
    params(("id" = String, Path, description = "Minor identifier")),
    request_body = NoteBody,
    responses(
        (status = 201, description = "Created", body = NoteSchema),
        (status = 400, description = "Invalid note", body = ErrorSchema),
        (status = 404, description = "Unknown or out of scope", body = ErrorSchema)
    ),
    tags = ["minors"],
    operation_id = "createNote"
)]
#[post("/jeunes/{id}/notes")]
pub async fn create_note(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<NoteBody>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let id = minor_id(&path)?;
    let NoteBody { title, body } = payload.into_inner();
    let note = state
        .minors
        .create_note(&principal, &id, NoteForm { title, body })
        .await?;
    Ok(HttpResponse::Created().json(note))
}

#[utoipa::path(
    get,
    path = "/api/v1/jeunes/{id}/transcriptions",
    params(("id" = String, Path, description = "Minor identifier")),
    responses(
        (status = 200, description = "Transcriptions", body = [TranscriptionSchema]),
        (status = 404, description = "Unknown or out of scope", body = ErrorSchema)
    ),
    tags = ["minors"],
    operation_id = "listTranscriptions"
)]
#[get("/jeunes/{id}/transcriptions")]
pub async fn list_transcriptions(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Transcription>>> {
    let principal = session.require_principal()?;
    let id = minor_id(&path)?;
    state.minors.transcriptions(&principal, &id).await.map(web::Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/jeunes/{id}/transcriptions",
    params(("id" = String, Path, description = "Minor identifier")),
    request_body = TranscriptionBody,
    responses(
        (status = 201, description = "Created", body = TranscriptionSchema),
        (status = 400, description = "Invalid transcription", body = ErrorSchema),
        (status = 404, description = "Unknown or out of scope", body = ErrorSchema)
    ),
    tags = ["minors"],
    operation_id = "createTranscription"
)]
#[post("/jeunes/{id}/transcriptions")]
pub async fn create_transcription(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<TranscriptionBody>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let id = minor_id(&path)?;
    let TranscriptionBody {
        body,
        interviewed_at,
    } = payload.into_inner();
    let form = TranscriptionForm {
        body,
        interviewed_at: parse_rfc3339_timestamp(&interviewed_at, FieldName::new("interviewedAt"))?,
    };
    let transcription = state
        .minors
        .create_transcription(&principal, &id, form)
        .await?;
    Ok(HttpResponse::Created().json(transcription))
}

/// Mark a transcription as reviewed.
#[utoipa::path(
    post,
    path = "/api/v1/jeunes/{id}/transcriptions/{transcriptionId}/validate",
    params(
        ("id" = String, Path, description = "Minor identifier"),
        ("transcriptionId" = String, Path, description = "Transcription identifier")
    ),
    responses(
        (status = 204, description = "Validated"),
        (status = 404, description = "Unknown or out of scope", body = ErrorSchema)
    ),
    tags = ["minors"],
    operation_id = "validateTranscription"
)]
#[post("/jeunes/{id}/transcriptions/{transcription_id}/validate")]
pub async fn validate_transcription(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let (minor, transcription) = path.into_inner();
    let id = minor_id(&minor)?;
    let transcription: TranscriptionId =
        parse_id(&transcription, FieldName::new("transcriptionId"))?;
    state
        .minors
        .validate_transcription(&principal, &id, &transcription)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/api/v1/jeunes/{id}/evenements",
    params(("id" = String, Path, description = "Minor identifier")),
    responses(
        (status = 200, description = "Events", body = [EventSchema]),
        (status = 404, description = "Unknown or out of scope", body = ErrorSchema)
    ),
    tags = ["minors"],
    operation_id = "listMinorEvents"
)]
#[get("/jeunes/{id}/evenements")]
pub async fn list_events(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Event>>> {
    let principal = session.require_principal()?;
    let id = minor_id(&path)?;
    state.minors.events(&principal, &id).await.map(web::Json)
}

/// Register every case-file route on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_minors)
        .service(create_minor)
        .service(get_minor)
        .service(mark_case_complete)
        .service(list_notes)
        .service(create_note)
        .service(list_transcriptions)
        .service(create_transcription)
        .service(validate_transcription)
        .service(list_events);
}

#[cfg(test)]
#[path = "minors_tests.rs"]
mod tests;
