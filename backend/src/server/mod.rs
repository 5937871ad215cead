//! Actix application assembly.
//!
//! Layout:
//! - `/api/v1/**` console API, behind the session cookie, 8 MiB JSON limit
//! - `/health/{ready,live}` probes, no session
//! - `/docs` Swagger UI (debug builds)
//! - `/metrics` when built with the `metrics` feature

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::ServerConfig;

#[cfg(feature = "metrics")]
pub(crate) use metrics::prometheus_metrics;

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use gensys_console::Trace;
use gensys_console::inbound::http::error::{json_error_handler, query_error_handler};
use gensys_console::inbound::http::health::{HealthState, live, ready};
use gensys_console::inbound::http::state::HttpState;
use gensys_console::inbound::http::{
    dashboard, minors, navigation, registration, staff, structures, users,
};

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;
use state_builders::build_http_state;

/// Logos travel hex-encoded, doubling their size on the wire.
const JSON_BODY_LIMIT: usize = 8 * 1024 * 1024;
const SESSION_COOKIE: &str = "gensys_session";
const SESSION_TTL: CookieDuration = CookieDuration::hours(8);

/// Cookie policy shared by every worker.
#[derive(Clone)]
struct CookiePolicy {
    key: Key,
    secure: bool,
    same_site: SameSite,
}

impl CookiePolicy {
    fn middleware(&self) -> SessionMiddleware<CookieSessionStore> {
        SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name(SESSION_COOKIE.to_owned())
            .cookie_path("/".to_owned())
            .cookie_secure(self.secure)
            .cookie_http_only(true)
            .cookie_same_site(self.same_site)
            .cookie_content_security(CookieContentSecurity::Private)
            .session_lifecycle(PersistentSession::default().session_ttl(SESSION_TTL))
            .build()
    }
}

/// Session, navigation and dashboard endpoints.
fn session_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(navigation::check_navigation)
        .service(dashboard::get_dashboard)
        .service(dashboard::get_alerts)
        .service(dashboard::get_stats);
}

/// Structure administration, invitations and the staff directory.
fn administration_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(structures::list_structures)
        .service(structures::create_structure)
        .service(structures::issue_invite)
        .service(registration::lookup_invite)
        .service(registration::register)
        .service(staff::list_staff)
        .service(staff::update_role)
        .service(staff::update_mode)
        .service(staff::delete_staff);
}

fn api_scope(
    cookies: &CookiePolicy,
) -> actix_web::Scope<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    web::scope("/api/v1")
        .wrap(cookies.middleware())
        .app_data(
            web::JsonConfig::default()
                .limit(JSON_BODY_LIMIT)
                .error_handler(json_error_handler),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .configure(session_routes)
        .configure(administration_routes)
        .configure(minors::configure)
}

fn build_app(
    health: web::Data<HealthState>,
    state: web::Data<HttpState>,
    cookies: &CookiePolicy,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let app = App::new()
        .app_data(health)
        .app_data(state)
        .wrap(Trace)
        .service(api_scope(cookies))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = {
        use gensys_console::ApiDoc;
        use utoipa::OpenApi as _;
        use utoipa_swagger_ui::SwaggerUi;

        app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
    };

    app
}

/// Wire the adapters for the configured backend and bind the listener.
///
/// Readiness flips once the socket is bound.
///
/// # Errors
///
/// Fails when the adapters cannot be built (including demo seeding) or the
/// address cannot be bound.
pub async fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let (state, backend) = build_http_state(&config).await?;
    let health = web::Data::new(HealthState::new(backend));
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        #[cfg(feature = "metrics")]
        prometheus,
        ..
    } = config;
    let cookies = CookiePolicy {
        key,
        secure: cookie_secure,
        same_site,
    };

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from(prometheus);

    let worker_health = health.clone();
    let server = HttpServer::new(move || {
        let app = build_app(worker_health.clone(), state.clone(), &cookies);
        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());
        app
    })
    .bind(bind_addr)?
    .run();

    health.mark_ready();
    info!(?backend, "adapters wired, readiness enabled");
    Ok(server)
}
