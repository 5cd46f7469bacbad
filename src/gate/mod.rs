//! Route classification and the allow/redirect decision table.

mod policy;
mod route;

pub use policy::RoutePolicy;
pub use route::{PatternError, RoutePattern};

use crate::session::{Role, Session};

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// No restriction.
    Open,
    /// Only reachable without a session (login, register).
    Public,
    /// Requires any valid session.
    Protected,
    /// Requires a valid ADMIN session.
    AdminOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(&'static str),
}

pub fn decide(class: RouteClass, session: Option<&Session>) -> Decision {
    let role = session.map(|s| s.role);

    match (class, role) {
        (RouteClass::Open, _) => Decision::Allow,
        (RouteClass::Public, None) => Decision::Allow,
        (RouteClass::Public, Some(_)) => Decision::Redirect(HOME_PATH),
        (RouteClass::Protected, None) => Decision::Redirect(LOGIN_PATH),
        (RouteClass::Protected, Some(_)) => Decision::Allow,
        (RouteClass::AdminOnly, Some(Role::Admin)) => Decision::Allow,
        (RouteClass::AdminOnly, _) => Decision::Redirect(HOME_PATH),
    }
}
