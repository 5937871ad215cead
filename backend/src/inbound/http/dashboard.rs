//! Dashboard read endpoints.
//!
//! ```text
//! GET /api/v1/dashboard?date=2024-03-15&structureId=...
//! GET /api/v1/dashboard/alerts
//! GET /api/v1/dashboard/stats
//! ```
//!
//! Actix drops the handler future when the client disconnects, so an
//! abandoned load never completes its fan-out.

use actix_web::{get, web};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Alert, DashboardStats, DashboardView, Error, ScheduledEvent, ScopeFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    AlertSchema, DashboardStatsSchema, DashboardViewSchema, ErrorSchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional_date, parse_optional_id};

/// Query parameters shared by the dashboard endpoints.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DashboardParams {
    /// Calendar day whose events are listed, `YYYY-MM-DD`. Defaults to today (UTC).
    pub date: Option<String>,
    /// Structure to focus on; only super-admins may name another structure.
    pub structure_id: Option<String>,
}

/// Dashboard payload with the events of the selected day.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[schema(value_type = DashboardViewSchema)]
    pub dashboard: DashboardView,
    pub selected_date: NaiveDate,
    #[schema(value_type = Vec<Object>)]
    pub selected_events: Vec<ScheduledEvent>,
}

impl DashboardResponse {
    fn new(dashboard: DashboardView, selected_date: NaiveDate) -> Self {
        let selected_events = dashboard
            .events_on(selected_date)
            .into_iter()
            .cloned()
            .collect();
        Self {
            dashboard,
            selected_date,
            selected_events,
        }
    }
}

fn scope_for(session: &SessionContext, params: &DashboardParams) -> Result<ScopeFilter, Error> {
    let principal = session.require_principal()?;
    let focus = parse_optional_id(params.structure_id.as_deref(), FieldName::new("structureId"))?;
    ScopeFilter::focused(&principal, focus)
}

/// Compose the full dashboard for the caller's scope.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    params(DashboardParams),
    responses(
        (status = 200, description = "Dashboard", body = DashboardResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "A collection could not be fetched", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "getDashboard"
)]
#[get("/dashboard")]
pub async fn get_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<DashboardParams>,
) -> ApiResult<web::Json<DashboardResponse>> {
    let scope = scope_for(&session, &params)?;
    let selected = parse_optional_date(params.date.as_deref(), FieldName::new("date"))?
        .unwrap_or_else(|| Utc::now().date_naive());
    let view = state.dashboard.dashboard(&scope).await?;
    Ok(web::Json(DashboardResponse::new(view, selected)))
}

/// Alerts only, sorted by timestamp.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/alerts",
    params(DashboardParams),
    responses(
        (status = 200, description = "Alerts", body = [AlertSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "A collection could not be fetched", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "getAlerts"
)]
#[get("/dashboard/alerts")]
pub async fn get_alerts(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<DashboardParams>,
) -> ApiResult<web::Json<Vec<Alert>>> {
    let scope = scope_for(&session, &params)?;
    state.dashboard.alerts(&scope).await.map(web::Json)
}

/// Counters only.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    params(DashboardParams),
    responses(
        (status = 200, description = "Statistics", body = DashboardStatsSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "A collection could not be fetched", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "getStats"
)]
#[get("/dashboard/stats")]
pub async fn get_stats(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<DashboardParams>,
) -> ApiResult<web::Json<DashboardStats>> {
    let scope = scope_for(&session, &params)?;
    state.dashboard.stats(&scope).await.map(web::Json)
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
