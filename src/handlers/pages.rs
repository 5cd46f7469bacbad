// handlers/pages.rs - OPEN pages and the shared page payloads

use axum::response::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, MaybePrincipal};
use crate::session::{Role, Session};

/// Who is looking at a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Viewer {
    pub principal_id: String,
    pub role: Role,
}

impl From<&Session> for Viewer {
    fn from(session: &Session) -> Self {
        Self {
            principal_id: session.principal_id.clone(),
            role: session.role,
        }
    }
}

/// Payload of a section page whose listing is rendered from the entity store.
#[derive(Debug, Serialize)]
pub struct SectionPage {
    pub section: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub viewer: Viewer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub href: String,
}

fn link(label: &'static str, href: impl Into<String>) -> NavLink {
    NavLink { label, href: href.into() }
}

/// Navigation bar entries for the given session.
pub fn navigation(session: Option<&Session>) -> Vec<NavLink> {
    let mut links = vec![link("Home", "/")];

    match session {
        Some(s) if s.is_admin() => {
            links.push(link("Users", "/users"));
            links.push(link("Customers", "/customers"));
            links.push(link("Bookings", "/bookings"));
            links.push(link("Flights", "/flights"));
        }
        Some(s) => {
            links.push(link("Profile", format!("/users/{}", s.principal_id)));
            links.push(link("Bookings", format!("/bookings/{}", s.principal_id)));
        }
        None => {}
    }

    links.push(link("Reviews", "/reviews"));
    links.push(link("Hotels", "/hotels"));
    links.push(link("Destinations", "/destinations"));
    links.push(link("Activities", "/activities"));

    match session {
        Some(_) => links.push(link("Log out", "/logout")),
        None => {
            links.push(link("Log in", "/login"));
            links.push(link("Register", "/register"));
        }
    }

    links
}

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub name: &'static str,
    pub version: &'static str,
    pub viewer: Option<Viewer>,
    pub navigation: Vec<NavLink>,
}

/// GET / - home page
pub async fn root(MaybePrincipal(session): MaybePrincipal) -> ApiResponse<HomePage> {
    ApiResponse::success(HomePage {
        name: "Tourdesk",
        version: env!("CARGO_PKG_VERSION"),
        viewer: session.as_ref().map(Viewer::from),
        navigation: navigation(session.as_ref()),
    })
}

/// GET /health - liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now()
        }
    }))
}
