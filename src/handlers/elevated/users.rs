use axum::extract::{Path, State};

use crate::error::ApiError;
use crate::middleware::{AdminPrincipal, ApiResponse, ApiResult};
use crate::state::AppState;
use crate::users::UserView;

/// GET /users - every account
pub async fn users_list(State(state): State<AppState>, _admin: AdminPrincipal) -> ApiResult<Vec<UserView>> {
    let users = state.users.list().await;
    Ok(ApiResponse::success(users.iter().map(UserView::from).collect()))
}

/// DELETE /users/:id - remove an account
///
/// `/users/:id` is a PROTECTED route, so clients get past the gate; the
/// ADMIN requirement is enforced here.
pub async fn user_delete(
    State(state): State<AppState>,
    AdminPrincipal(admin): AdminPrincipal,
    Path(id): Path<String>,
) -> ApiResult<UserView> {
    if admin.principal_id == id {
        return Err(ApiError::forbidden("Administrators cannot delete their own account"));
    }

    let user = state.users.delete(&id).await?;
    tracing::info!(admin_id = %admin.principal_id, user_id = %user.id, "User deleted");

    Ok(ApiResponse::success(UserView::from(&user)))
}
