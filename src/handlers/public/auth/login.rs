// handlers/public/auth/login.rs - GET/POST /login

use axum::{extract::rejection::JsonRejection, extract::State, response::Response, Json};
use serde_json::Value;

use super::validate::LoginRequest;
use super::{form, grant_session, json_body};
use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::state::AppState;
use crate::users::password;

/// GET /login - describe the login form
pub async fn login_get() -> ApiResponse<Value> {
    ApiResponse::success(form(
        "login",
        "/login",
        &[("email", "email", true), ("password", "password", true)],
    ))
}

/**
 * POST /login - authenticate credentials and start a session
 *
 * Input: `{ "email": "...", "password": "..." }`
 *
 * On success the response carries the `session` cookie and
 * `{ "user": {...}, "expires_at": "..." }`. Unknown email and wrong password
 * produce the same 401 so the endpoint does not reveal which accounts exist.
 */
pub async fn login_post(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let body = json_body(body)?;
    let credentials = body.validate()?;

    let candidate = credentials.password.expose_secret();
    let user = match state.users.find_by_email(&credentials.email).await {
        Some(user) if user.verify_password(candidate) => user,
        found => {
            // Unknown emails pay for a hash check too
            if found.is_none() {
                password::verify_missing_account(candidate);
            }
            tracing::warn!("Login failed: invalid credentials");
            return Err(ApiError::unauthorized("Invalid email or password"));
        }
    };

    let issued = state.codec.issue(&user.id, user.role)?;

    if state.config.security.enable_audit_logging {
        tracing::info!(user_id = %user.id, role = %user.role, "Session created by login");
    } else {
        tracing::debug!(user_id = %user.id, "Session created by login");
    }

    grant_session(&state, &user, &issued, ApiResponse::success)
}
