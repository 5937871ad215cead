//! Route guard endpoint for the browser console.
//!
//! ```text
//! GET /api/v1/navigation?path=/creer-structure
//! ```

use actix_web::{get, web};
use serde::Deserialize;

use crate::domain::{GuardDecision, navigate};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::validation::{FieldName, missing_field_error};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NavigationParams {
    /// Console path the browser is about to render.
    pub path: Option<String>,
}

/// Decide whether the current session may enter `path`.
#[utoipa::path(
    get,
    path = "/api/v1/navigation",
    params(NavigationParams),
    responses(
        (status = 200, description = "Guard decision", body = Object,
            example = json!({"decision": "redirect", "to": "/dashboard"})),
        (status = 400, description = "Missing path", body = ErrorSchema)
    ),
    tags = ["navigation"],
    operation_id = "navigate",
    security([])
)]
#[get("/navigation")]
pub async fn check_navigation(
    session: SessionContext,
    params: web::Query<NavigationParams>,
) -> ApiResult<web::Json<GuardDecision>> {
    let path = params
        .path
        .as_deref()
        .ok_or_else(|| missing_field_error(FieldName::new("path")))?;
    Ok(web::Json(navigate(&session.auth_state(), path)))
}
