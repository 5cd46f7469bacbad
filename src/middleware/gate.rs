use axum::{
    extract::{Request, State},
    http::header::SET_COOKIE,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::gate::{self, Decision};
use crate::session::{cookie, Session};
use crate::state::AppState;

/// Session resolved by [`access_gate`] for the current request, if any.
#[derive(Clone, Debug, Default)]
pub struct CurrentSession(pub Option<Session>);

/// Route-level access control applied before any handler runs.
///
/// Reads the session cookie, verifies it, classifies the request path and
/// either forwards the request or redirects. A missing, malformed, tampered or
/// expired cookie all count as "no session"; a cookie that failed
/// verification is also cleared on the way out.
pub async fn access_gate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let cookie_name = state.cookie_name();
    let token = cookie::read_cookie(request.headers(), cookie_name).map(str::to_owned);
    let session = token.as_deref().and_then(|t| state.codec.verify(t));
    let stale_cookie = token.is_some() && session.is_none();

    let class = state.policy.classify(request.uri().path());
    let decision = gate::decide(class, session.as_ref());

    tracing::debug!(
        path = %request.uri().path(),
        ?class,
        ?decision,
        authenticated = session.is_some(),
        "access gate"
    );

    let mut response = match decision {
        Decision::Redirect(location) => Redirect::temporary(location).into_response(),
        Decision::Allow => {
            request.extensions_mut().insert(CurrentSession(session));
            next.run(request).await
        }
    };

    if stale_cookie && !sets_cookie(&response, cookie_name) {
        if let Some(clear) = cookie::clear_session_cookie(cookie_name) {
            response.headers_mut().append(SET_COOKIE, clear);
        }
    }

    response
}

fn sets_cookie(response: &Response, name: &str) -> bool {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.split_once('=').map(|(k, _)| k.trim() == name).unwrap_or(false))
}
