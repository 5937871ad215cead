//! Console route table and role-gated navigation decisions.

use serde::{Deserialize, Serialize};

use super::{Principal, StaffRole};

/// Where every blocked navigation lands.
pub const FALLBACK_PATH: &str = "/dashboard";
/// Where signed-out visitors land.
pub const SIGN_IN_PATH: &str = "/";

/// Minimum role needed to enter a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteAccess {
    Public,
    Requires(StaffRole),
}

/// Known console pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum AppRoute {
    SignIn,
    Dashboard,
    CreateStructure,
    StaffDirectory,
    Minors,
    MinorDetail { id: String },
    Registration,
}

impl AppRoute {
    #[must_use]
    pub const fn access(&self) -> RouteAccess {
        match self {
            Self::SignIn | Self::Registration => RouteAccess::Public,
            Self::CreateStructure => RouteAccess::Requires(StaffRole::SuperAdmin),
            Self::Dashboard | Self::StaffDirectory | Self::Minors | Self::MinorDetail { .. } => {
                RouteAccess::Requires(StaffRole::User)
            }
        }
    }
}

/// Outcome of matching a path against the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    Page(AppRoute),
    /// Legacy path that permanently moved.
    Moved(String),
    NotFound,
}

/// Match a console path. Trailing slashes and query strings are ignored.
///
/// # Examples
/// ```
/// use gensys_console::domain::{AppRoute, RouteMatch, resolve_path};
///
/// assert_eq!(resolve_path("/dashboard"), RouteMatch::Page(AppRoute::Dashboard));
/// assert_eq!(resolve_path("/jeunes"), RouteMatch::Moved("/mes-jeunes".into()));
/// ```
#[must_use]
pub fn resolve_path(path: &str) -> RouteMatch {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [] => RouteMatch::Page(AppRoute::SignIn),
        ["dashboard"] => RouteMatch::Page(AppRoute::Dashboard),
        ["creer-structure"] => RouteMatch::Page(AppRoute::CreateStructure),
        ["educateurs"] => RouteMatch::Page(AppRoute::StaffDirectory),
        ["mes-jeunes"] => RouteMatch::Page(AppRoute::Minors),
        ["mes-jeunes", id, ..] => RouteMatch::Page(AppRoute::MinorDetail {
            id: (*id).to_owned(),
        }),
        ["inscription"] => RouteMatch::Page(AppRoute::Registration),
        ["jeunes"] => RouteMatch::Moved("/mes-jeunes".to_owned()),
        ["jeunes", id] => RouteMatch::Moved(format!("/mes-jeunes/{id}")),
        _ => RouteMatch::NotFound,
    }
}

/// Authentication status as seen by the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Session lookup still in flight.
    Loading,
    SignedOut,
    SignedIn(Principal),
}

/// Decision for a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Auth is still loading; show a loading state.
    Pending,
    Allow,
    Redirect { to: String },
    NotFound,
}

/// Decide whether `auth` may enter a route requiring `access`.
#[must_use]
pub fn guard(auth: &AuthState, access: RouteAccess) -> GuardDecision {
    let RouteAccess::Requires(required) = access else {
        return GuardDecision::Allow;
    };
    match auth {
        AuthState::Loading => GuardDecision::Pending,
        AuthState::SignedOut => GuardDecision::Redirect {
            to: SIGN_IN_PATH.to_owned(),
        },
        AuthState::SignedIn(principal) if principal.role >= required => GuardDecision::Allow,
        AuthState::SignedIn(principal) => {
            tracing::info!(
                staff_id = %principal.id,
                role = principal.role.as_str(),
                required = required.as_str(),
                "navigation blocked by role requirement"
            );
            GuardDecision::Redirect {
                to: FALLBACK_PATH.to_owned(),
            }
        }
    }
}

/// Resolve a path and apply the guard in one step.
#[must_use]
pub fn navigate(auth: &AuthState, path: &str) -> GuardDecision {
    match resolve_path(path) {
        RouteMatch::Page(route) => guard(auth, route.access()),
        RouteMatch::Moved(to) => GuardDecision::Redirect { to },
        RouteMatch::NotFound => GuardDecision::NotFound,
    }
}

#[cfg(test)]
#[path = "navigation_tests.rs"]
mod tests;
