//! Staff directory endpoints.
//!
//! ```text
//! GET /api/v1/educateurs?search=martin
//! PATCH /api/v1/educateurs/{id}/role {"role":"admin"}
//! PATCH /api/v1/educateurs/{id}/mode {"mode":"demo"}
//! DELETE /api/v1/educateurs/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, StaffId, StaffListFilter, StaffMember, StaffMode, StaffRole};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, StaffMemberSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StaffListParams {
    /// Case-insensitive match on first name, last name or email.
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RoleChange {
    #[schema(value_type = String, example = "admin")]
    pub role: StaffRole,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ModeChange {
    #[schema(value_type = String, example = "demo")]
    pub mode: StaffMode,
}

fn staff_id(path: &str) -> Result<StaffId, Error> {
    parse_id(path, FieldName::new("id"))
}

/// Staff visible to the caller, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/educateurs",
    params(StaffListParams),
    responses(
        (status = 200, description = "Staff members", body = [StaffMemberSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["staff"],
    operation_id = "listStaff"
)]
#[get("/educateurs")]
pub async fn list_staff(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<StaffListParams>,
) -> ApiResult<web::Json<Vec<StaffMember>>> {
    let principal = session.require_principal()?;
    let filter = StaffListFilter {
        search: params.into_inner().search.unwrap_or_default(),
    };
    state.staff.list_staff(&principal, filter).await.map(web::Json)
}

/// Change a staff member's role.
#[utoipa::path(
    patch,
    path = "/api/v1/educateurs/{id}/role",
    params(("id" = String, Path, description = "Staff identifier")),
    request_body = RoleChange,
    responses(
        (status = 200, description = "Updated member", body = StaffMemberSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Unknown staff member", body = ErrorSchema)
    ),
    tags = ["staff"],
    operation_id = "updateStaffRole"
)]
#[patch("/educateurs/{id}/role")]
pub async fn update_role(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<RoleChange>,
) -> ApiResult<web::Json<StaffMember>> {
    let principal = session.require_principal()?;
    let id = staff_id(&path)?;
    state
        .staff
        .update_role(&principal, &id, payload.role)
        .await
        .map(web::Json)
}

/// Change a staff member's account mode.
#[utoipa::path(
    patch,
    path = "/api/v1/educateurs/{id}/mode",
    params(("id" = String, Path, description = "Staff identifier")),
    request_body = ModeChange,
    responses(
        (status = 200, description = "Updated member", body = StaffMemberSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Unknown staff member", body = ErrorSchema)
    ),
    tags = ["staff"],
    operation_id = "updateStaffMode"
)]
#[patch("/educateurs/{id}/mode")]
pub async fn update_mode(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ModeChange>,
) -> ApiResult<web::Json<StaffMember>> {
    let principal = session.require_principal()?;
    let id = staff_id(&path)?;
    state
        .staff
        .update_mode(&principal, &id, payload.mode)
        .await
        .map(web::Json)
}

/// Delete a staff account.
#[utoipa::path(
    delete,
    path = "/api/v1/educateurs/{id}",
    params(("id" = String, Path, description = "Staff identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Unknown staff member", body = ErrorSchema)
    ),
    tags = ["staff"],
    operation_id = "deleteStaff"
)]
#[delete("/educateurs/{id}")]
pub async fn delete_staff(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let id = staff_id(&path)?;
    state.staff.delete_staff(&principal, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}
