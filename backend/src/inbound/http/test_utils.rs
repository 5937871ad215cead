//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{HttpResponse, Route, test, web};

use std::sync::Arc;

use crate::domain::ports::{
    MockDashboardQuery, MockLoginService, MockMinorCaseFiles, MockRegistrationCommand,
    MockStaffDirectory, MockStructureAdmin,
};
use crate::domain::{Error, Principal, StaffRole, StructureId};

use super::session::SessionContext;
use super::state::HttpState;

/// Path of the helper route installed by [`sign_in_route`].
pub const SIGN_IN_PATH: &str = "/__test/sign-in";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Route persisting the posted principal into the session.
pub fn sign_in_route() -> Route {
    web::post().to(|session: SessionContext, principal: web::Json<Principal>| async move {
        session.persist_principal(&principal)?;
        Ok::<_, Error>(HttpResponse::NoContent().finish())
    })
}

pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Sign in through [`sign_in_route`] and return the session cookie.
pub async fn signed_in_cookie<S, B>(app: &S, principal: &Principal) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri(SIGN_IN_PATH)
            .set_json(principal)
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "test sign-in failed");
    session_cookie(&response)
}

pub fn principal(role: StaffRole, structure_id: StructureId) -> Principal {
    Principal {
        id: crate::domain::StaffId::random(),
        email: "camille@mecs.fr".to_owned(),
        display_name: "Camille Martin".to_owned(),
        role,
        structure_id,
    }
}

/// Driving-port mocks whose unconfigured methods panic when called.
#[derive(Default)]
pub struct DrivingMocks {
    pub login: MockLoginService,
    pub dashboard: MockDashboardQuery,
    pub structures: MockStructureAdmin,
    pub registration: MockRegistrationCommand,
    pub staff: MockStaffDirectory,
    pub minors: MockMinorCaseFiles,
}

impl DrivingMocks {
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            login: Arc::new(self.login),
            dashboard: Arc::new(self.dashboard),
            structures: Arc::new(self.structures),
            registration: Arc::new(self.registration),
            staff: Arc::new(self.staff),
            minors: Arc::new(self.minors),
        })
    }
}
