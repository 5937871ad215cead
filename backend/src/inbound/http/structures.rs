//! Structure management endpoints.
//!
//! ```text
//! GET /api/v1/structures
//! POST /api/v1/structures {"name":"MECS Les Tilleuls","type":"MECS",...,"logo":{...}}
//! POST /api/v1/structures/{id}/invite
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{CreateStructureRequest, CreatedStructure};
use crate::domain::{Error, InviteLink, Structure, StructureForm, StructureId, StructureType};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, InviteLinkSchema, StructureSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, decode_hex, parse_id};

/// Uploaded logo, hex encoded.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogoPayload {
    /// `image/png` or `image/svg+xml`.
    #[schema(example = "image/png")]
    pub content_type: String,
    /// File bytes as lowercase hex.
    pub data: String,
}

/// Request body for `POST /api/v1/structures`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStructureBody {
    pub name: String,
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "MECS")]
    pub structure_type: StructureType,
    pub city: String,
    pub email: String,
    #[schema(example = 50)]
    pub max_users: u32,
    pub logo: LogoPayload,
}

impl CreateStructureBody {
    fn into_request(self) -> Result<CreateStructureRequest, Error> {
        let logo = decode_hex(&self.logo.data, FieldName::new("logo"))?;
        Ok(CreateStructureRequest {
            form: StructureForm {
                name: self.name,
                structure_type: self.structure_type,
                city: self.city,
                email: self.email,
                max_users: self.max_users,
            },
            logo_content_type: self.logo.content_type,
            logo,
        })
    }
}

/// Created structure and the invitation link for its staff.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedStructureResponse {
    #[schema(value_type = StructureSchema)]
    pub structure: Structure,
    #[schema(value_type = InviteLinkSchema)]
    pub invite: InviteLink,
}

impl From<CreatedStructure> for CreatedStructureResponse {
    fn from(value: CreatedStructure) -> Self {
        Self {
            structure: value.structure,
            invite: value.invite,
        }
    }
}

/// Structures visible to the caller.
#[utoipa::path(
    get,
    path = "/api/v1/structures",
    responses(
        (status = 200, description = "Structures", body = [StructureSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["structures"],
    operation_id = "listStructures"
)]
#[get("/structures")]
pub async fn list_structures(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Structure>>> {
    let principal = session.require_principal()?;
    state.structures.list_structures(&principal).await.map(web::Json)
}

/// Create a structure with its logo. Super-admin only.
#[utoipa::path(
    post,
    path = "/api/v1/structures",
    request_body = CreateStructureBody,
    responses(
        (status = 201, description = "Structure created", body = CreatedStructureResponse),
        (status = 400, description = "Invalid form or logo", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Storage or record store unavailable", body = ErrorSchema)
    ),
    tags = ["structures"],
    operation_id = "createStructure"
)]
#[post("/structures")]
pub async fn create_structure(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateStructureBody>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let request = payload.into_inner().into_request()?;
    let created = state.structures.create_structure(&principal, request).await?;
    Ok(HttpResponse::Created().json(CreatedStructureResponse::from(created)))
}

/// Issue a registration link for a structure.
#[utoipa::path(
    post,
    path = "/api/v1/structures/{id}/invite",
    params(("id" = String, Path, description = "Structure identifier")),
    responses(
        (status = 200, description = "Invitation link", body = InviteLinkSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Unknown structure", body = ErrorSchema)
    ),
    tags = ["structures"],
    operation_id = "issueInvite"
)]
#[post("/structures/{id}/invite")]
pub async fn issue_invite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<InviteLink>> {
    let principal = session.require_principal()?;
    let structure: StructureId = parse_id(&path, FieldName::new("id"))?;
    state
        .structures
        .issue_invite(&principal, &structure)
        .await
        .map(web::Json)
}

#[cfg(test)]
#[path = "structures_tests.rs"]
mod tests;
