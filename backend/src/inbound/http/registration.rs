//! Invitation-based self registration.
//!
//! ```text
//! GET /api/v1/inscription/{structureId}
//! POST /api/v1/inscription {"structureId":"...","prenom":"Sam",...}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{RegisteredAccount, RegistrationForm};
use crate::domain::{Error, StaffId, StructureId, StructureSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, StructureSummarySchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Request body for `POST /api/v1/inscription`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationBody {
    pub structure_id: String,
    pub prenom: String,
    pub nom: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    #[serde(default)]
    pub accepted_terms: bool,
}

impl RegistrationBody {
    fn into_form(self) -> Result<RegistrationForm, Error> {
        Ok(RegistrationForm {
            structure_id: parse_id(&self.structure_id, FieldName::new("structureId"))?,
            first_name: self.prenom,
            last_name: self.nom,
            email: self.email,
            password: self.password,
            password_confirmation: self.password_confirmation,
            accepted_terms: self.accepted_terms,
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredResponse {
    #[schema(value_type = String, format = Uuid)]
    pub staff_id: StaffId,
    #[schema(value_type = StructureSummarySchema)]
    pub structure: StructureSummary,
}

impl From<RegisteredAccount> for RegisteredResponse {
    fn from(value: RegisteredAccount) -> Self {
        Self {
            staff_id: value.staff_id,
            structure: value.structure,
        }
    }
}

/// Resolve an invitation link to its structure.
#[utoipa::path(
    get,
    path = "/api/v1/inscription/{structureId}",
    params(("structureId" = String, Path, description = "Structure named by the invitation link")),
    responses(
        (status = 200, description = "Structure summary", body = StructureSummarySchema),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Invalid invitation link", body = ErrorSchema)
    ),
    tags = ["registration"],
    operation_id = "lookupInvite",
    security([])
)]
#[get("/inscription/{structure_id}")]
pub async fn lookup_invite(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<StructureSummary>> {
    let structure: StructureId = parse_id(&path, FieldName::new("structureId"))?;
    state.registration.lookup_invite(&structure).await.map(web::Json)
}

/// Create a staff account attached to the invited structure.
#[utoipa::path(
    post,
    path = "/api/v1/inscription",
    request_body = RegistrationBody,
    responses(
        (status = 201, description = "Account created", body = RegisteredResponse),
        (status = 400, description = "Invalid form", body = ErrorSchema),
        (status = 404, description = "Invalid invitation link", body = ErrorSchema),
        (status = 409, description = "Quota reached or email already registered", body = ErrorSchema)
    ),
    tags = ["registration"],
    operation_id = "register",
    security([])
)]
#[post("/inscription")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegistrationBody>,
) -> ApiResult<HttpResponse> {
    let form = payload.into_inner().into_form()?;
    let account = state.registration.register(form).await?;
    Ok(HttpResponse::Created().json(RegisteredResponse::from(account)))
}
