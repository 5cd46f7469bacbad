use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{elevated, pages, protected, public};
use crate::middleware::access_gate;
use crate::state::AppState;

/// Build the application router with the access gate in front of every route.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security);

    Router::new()
        // Open pages
        .route("/", get(pages::root))
        .route("/health", get(pages::health))
        .merge(auth_routes())
        .merge(account_routes())
        .merge(admin_routes())
        .layer(middleware::from_fn_with_state(state.clone(), access_gate))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/login", get(auth::login_get).post(auth::login_post))
        .route("/register", get(auth::register_get).post(auth::register_post))
        .route("/logout", post(auth::logout_post))
}

fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(protected::whoami_get))
        // Deleting is admin-only; the handler checks, not the gate
        .route("/users/:id", get(protected::user_get).delete(elevated::user_delete))
        .route("/bookings/:id", get(protected::customer_bookings_get))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(elevated::users_list))
        .route("/customers", get(elevated::customers_get))
        .route("/bookings", get(elevated::bookings_get))
        .route("/flights", get(elevated::flights_get))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
