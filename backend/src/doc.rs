//! OpenAPI document for the console REST API.
//!
//! Paths come from the inbound HTTP handlers. Domain types stay free of
//! utoipa derives; the wrappers in [`crate::inbound::http::schemas`] publish
//! their shapes under the domain names. The session cookie is registered as
//! the default security scheme.

use crate::inbound::http::schemas::{
    AlertSchema, DashboardStatsSchema, DashboardViewSchema, ErrorCodeSchema, ErrorSchema,
    EventSchema, InviteLinkSchema, MinorRecordSchema, NoteSchema, PrincipalSchema,
    StaffMemberSchema, StructureSchema, StructureSummarySchema, TranscriptionSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document served by Swagger UI in debug builds.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Gensys console API",
        description = "Structure administration, staff directory, case files and dashboard for child-protection teams."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::navigation::check_navigation,
        crate::inbound::http::dashboard::get_dashboard,
        crate::inbound::http::dashboard::get_alerts,
        crate::inbound::http::dashboard::get_stats,
        crate::inbound::http::structures::list_structures,
        crate::inbound::http::structures::create_structure,
        crate::inbound::http::structures::issue_invite,
        crate::inbound::http::registration::lookup_invite,
        crate::inbound::http::registration::register,
        crate::inbound::http::staff::list_staff,
        crate::inbound::http::staff::update_role,
        crate::inbound::http::staff::update_mode,
        crate::inbound::http::staff::delete_staff,
        crate::inbound::http::minors::list_minors,
        crate::inbound::http::minors::create_minor,
        crate::inbound::http::minors::get_minor,
        crate::inbound::http::minors::mark_case_complete,
        crate::inbound::http::minors::list_notes,
        crate::inbound::http::minors::create_note,
        crate::inbound::http::minors::list_transcriptions,
        crate::inbound::http::minors::create_transcription,
        crate::inbound::http::minors::validate_transcription,
        crate::inbound::http::minors::list_events,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        PrincipalSchema,
        AlertSchema,
        DashboardStatsSchema,
        DashboardViewSchema,
        StructureSchema,
        StructureSummarySchema,
        InviteLinkSchema,
        StaffMemberSchema,
        MinorRecordSchema,
        NoteSchema,
        TranscriptionSchema,
        EventSchema,
    )),
    tags(
        (name = "users", description = "Session sign-in and the current principal"),
        (name = "navigation", description = "Route guard decisions"),
        (name = "dashboard", description = "Alerts, statistics and upcoming events"),
        (name = "structures", description = "Structure administration and invitations"),
        (name = "registration", description = "Invitation-based staff sign-up"),
        (name = "staff", description = "Staff directory"),
        (name = "minors", description = "Case files, notes, transcriptions and events"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
