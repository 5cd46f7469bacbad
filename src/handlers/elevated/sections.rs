use crate::handlers::pages::{SectionPage, Viewer};
use crate::middleware::{AdminPrincipal, ApiResponse, ApiResult};

fn section(name: &'static str, admin: &AdminPrincipal) -> ApiResult<SectionPage> {
    Ok(ApiResponse::success(SectionPage {
        section: name,
        owner: None,
        viewer: Viewer::from(&admin.0),
    }))
}

/// GET /customers
pub async fn customers_get(admin: AdminPrincipal) -> ApiResult<SectionPage> {
    section("customers", &admin)
}

/// GET /bookings
pub async fn bookings_get(admin: AdminPrincipal) -> ApiResult<SectionPage> {
    section("bookings", &admin)
}

/// GET /flights
pub async fn flights_get(admin: AdminPrincipal) -> ApiResult<SectionPage> {
    section("flights", &admin)
}
