use axum::extract::Path;

use crate::handlers::pages::{SectionPage, Viewer};
use crate::middleware::{ApiResponse, ApiResult, Principal};

/// GET /bookings/:id - bookings of one customer, keyed by the customer's user id
pub async fn customer_bookings_get(principal: Principal, Path(id): Path<String>) -> ApiResult<SectionPage> {
    principal.require_self_or_admin(&id)?;

    Ok(ApiResponse::success(SectionPage {
        section: "bookings",
        owner: Some(id),
        viewer: Viewer::from(&principal.0),
    }))
}
