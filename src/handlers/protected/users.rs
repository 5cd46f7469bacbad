use axum::extract::{Path, State};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Principal};
use crate::state::AppState;
use crate::users::UserView;

/// GET /users/:id - an account page, visible to its owner and to admins
pub async fn user_get(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> ApiResult<UserView> {
    principal.require_self_or_admin(&id)?;

    let user = state
        .users
        .find_by_id(&id)
        .await
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", id)))?;

    Ok(ApiResponse::success(UserView::from(&user)))
}
