// handlers/public/auth/register.rs - GET/POST /register

use axum::{extract::rejection::JsonRejection, extract::State, response::Response, Json};
use serde_json::Value;

use super::validate::RegisterRequest;
use super::{form, grant_session, json_body};
use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::session::Role;
use crate::state::AppState;
use crate::users::NewUser;

/// GET /register - describe the registration form
pub async fn register_get() -> ApiResponse<Value> {
    ApiResponse::success(form(
        "register",
        "/register",
        &[
            ("email", "email", true),
            ("password", "password", true),
            ("first_name", "text", true),
            ("last_name", "text", true),
            ("phone_number", "tel", false),
            ("address", "text", false),
            ("city", "text", false),
        ],
    ))
}

/**
 * POST /register - create a client account and start a session
 *
 * Self-registration always creates a CLIENT; administrators are provisioned
 * through configuration. Returns 201 with the session cookie, or 409 when
 * the email is already registered.
 */
pub async fn register_post(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let body = json_body(body)?;
    let registration = body.validate()?;
    let name = registration.display_name();

    let user = state
        .users
        .create(NewUser {
            email: registration.credentials.email,
            name,
            role: Role::Client,
            password: registration.credentials.password,
            profile: Some(registration.profile),
        })
        .await?;

    let issued = state.codec.issue(&user.id, user.role)?;

    if state.config.security.enable_audit_logging {
        tracing::info!(user_id = %user.id, "Account registered");
    } else {
        tracing::debug!(user_id = %user.id, "Account registered");
    }

    grant_session(&state, &user, &issued, ApiResponse::created)
}
