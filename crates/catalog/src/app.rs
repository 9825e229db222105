use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::{health, readyz},
        products::{create_product, list_products},
    },
    state::AppState,
};

/// Headroom the HTTP layer leaves on top of the per-statement store timeout.
const STORE_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

/// HTTP request timeout for a given store request timeout.
///
/// Always above the store bound, so a hung statement fails in the
/// repository first.
pub fn request_timeout(store_timeout: Duration) -> Duration {
    store_timeout.saturating_add(STORE_TIMEOUT_MARGIN)
}

/// Create the application router with all routes and middleware.
///
/// Requests running longer than `timeout` are answered with 504.
pub fn create_app(state: AppState, timeout: Duration) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/products", get(list_products).post(create_product))
        .layer(cors);

    Router::new()
        .route("/health", get(health))
        .route("/readyz", get(readyz))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(StatusCode::GATEWAY_TIMEOUT, timeout))
        .with_state(state)
}
