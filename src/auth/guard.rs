//! Route guard decisions
//!
//! Every navigation to a matched path is decided here before any page
//! handler runs. The decision is a pure function of the path and two cookie
//! signals (token presence, role label); it does no I/O and cannot fail.
//! Missing or malformed cookies degrade to the unauthenticated or
//! unrecognized-role branches.

use serde::Serialize;
use std::fmt;

use crate::auth::models::{Role, Session};

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const ROOT_PATH: &str = "/";

/// Classification of a requested path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Login or registration; only meant for logged-out visitors
    AuthPage,
    /// Area reserved to one role
    RoleArea(Role),
    /// Anything else; the guard lets it through
    Open,
}

/// Outcome of the guard for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "target", rename_all = "lowercase")]
pub enum GuardDecision {
    Proceed,
    Redirect(&'static str),
}

impl GuardDecision {
    pub fn is_redirect(&self) -> bool {
        matches!(self, GuardDecision::Redirect(_))
    }
}

impl fmt::Display for GuardDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardDecision::Proceed => f.write_str("proceed"),
            GuardDecision::Redirect(target) => write!(f, "redirect {}", target),
        }
    }
}

/// Classify a path.
///
/// Auth pages and role areas are prefix matches, so `/login/help` is an auth
/// page and `/administration` falls in the admin area.
pub fn classify(path: &str) -> RouteClass {
    if path.starts_with(LOGIN_PATH) || path.starts_with(REGISTER_PATH) {
        return RouteClass::AuthPage;
    }
    Role::ALL
        .into_iter()
        .find(|role| path.starts_with(role.area_prefix()))
        .map(RouteClass::RoleArea)
        .unwrap_or(RouteClass::Open)
}

/// Whether the guard is activated for a path at all
///
/// Matches `/login`, `/register` and each role area with any sub-path.
pub fn is_guarded(path: &str) -> bool {
    if path == LOGIN_PATH || path == REGISTER_PATH {
        return true;
    }
    Role::ALL.into_iter().any(|role| {
        let prefix = role.area_prefix();
        path == prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Decide what to do with a navigation to `path` under `session`
pub fn decide(path: &str, session: &Session) -> GuardDecision {
    let class = classify(path);

    if !session.has_access_token {
        return match class {
            RouteClass::AuthPage => GuardDecision::Proceed,
            _ => GuardDecision::Redirect(LOGIN_PATH),
        };
    }

    let role = session.parsed_role();
    match class {
        RouteClass::AuthPage => {
            GuardDecision::Redirect(role.map(|r| r.home_path()).unwrap_or(ROOT_PATH))
        }
        RouteClass::RoleArea(required) if role != Some(required) => {
            GuardDecision::Redirect(ROOT_PATH)
        }
        _ => GuardDecision::Proceed,
    }
}

/// Apply the matcher first, then decide; unmatched paths always proceed
pub fn evaluate(path: &str, session: &Session) -> GuardDecision {
    if is_guarded(path) {
        decide(path, session)
    } else {
        GuardDecision::Proceed
    }
}
