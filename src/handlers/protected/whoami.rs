use axum::extract::State;
use serde::Serialize;

use crate::middleware::{ApiResponse, ApiResult, Principal};
use crate::session::Session;
use crate::state::AppState;
use crate::users::UserView;

#[derive(Debug, Serialize)]
pub struct WhoAmI {
    pub session: Session,
    /// `None` when the account was deleted after the session was issued.
    pub user: Option<UserView>,
}

/// GET /me - the current principal and their account
pub async fn whoami_get(State(state): State<AppState>, Principal(session): Principal) -> ApiResult<WhoAmI> {
    let user = state
        .users
        .find_by_id(&session.principal_id)
        .await
        .as_ref()
        .map(UserView::from);

    Ok(ApiResponse::success(WhoAmI { session, user }))
}
