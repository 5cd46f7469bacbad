// handlers/public/auth/logout.rs - POST /logout

use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
};

use crate::gate::LOGIN_PATH;
use crate::middleware::MaybePrincipal;
use crate::session::cookie;
use crate::state::AppState;

/// POST /logout - drop the session cookie and send the browser to /login
///
/// Sessions are stateless: this only removes the client's copy. A token
/// captured before logout keeps working until it expires.
pub async fn logout_post(State(state): State<AppState>, MaybePrincipal(session): MaybePrincipal) -> Response {
    if let Some(session) = &session {
        tracing::debug!(user_id = %session.principal_id, "Session cookie cleared by logout");
    }

    match cookie::clear_session_cookie(state.cookie_name()) {
        Some(clear) => ([(SET_COOKIE, clear)], Redirect::to(LOGIN_PATH)).into_response(),
        None => Redirect::to(LOGIN_PATH).into_response(),
    }
}
