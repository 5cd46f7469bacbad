// handlers/public/auth/mod.rs - Session acquisition and release
//
// Login and registration are the only places a session is created. Both
// routes are in the PUBLIC class, so the access gate redirects visitors who
// already hold a valid session before these handlers run.

use axum::{
    extract::rejection::JsonRejection,
    http::header::SET_COOKIE,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{ApiError, FieldErrors};
use crate::middleware::ApiResponse;
use crate::session::{cookie, IssuedSession};
use crate::state::AppState;
use crate::users::{User, UserView};

pub mod login;
pub mod logout;
pub mod register;
pub mod validate;

pub use login::{login_get, login_post};
pub use logout::logout_post;
pub use register::{register_get, register_post};

#[derive(Debug, Serialize)]
pub struct SessionGranted {
    pub user: UserView,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

/// Attach the session cookie to a response announcing the new session.
fn grant_session(
    state: &AppState,
    user: &User,
    issued: &IssuedSession,
    response: impl FnOnce(SessionGranted) -> ApiResponse<SessionGranted>,
) -> Result<Response, ApiError> {
    let set_cookie = cookie::session_cookie(state.cookie_name(), issued)
        .ok_or_else(|| ApiError::internal_server_error("Could not create session"))?;

    let body = response(SessionGranted {
        user: UserView::from(user),
        expires_at: issued.session.expires_at,
    });

    Ok(([(SET_COOKIE, set_cookie)], body).into_response())
}

/// Unwrap a JSON body, reporting a bad or missing body in the API error envelope.
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(status = %rejection.status(), "Rejected request body");
            Err(ApiError::validation_error(
                format!("Invalid request body: {}", rejection.body_text()),
                FieldErrors::new(),
            ))
        }
    }
}

/// Describe a form for the client-side renderer.
fn form(name: &str, action: &str, fields: &[(&str, &str, bool)]) -> Value {
    let fields: Vec<Value> = fields
        .iter()
        .map(|(name, kind, required)| json!({ "name": name, "type": kind, "required": required }))
        .collect();

    json!({ "form": name, "action": action, "method": "POST", "fields": fields })
}
