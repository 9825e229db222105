//! Health check endpoints.
//!
//! - `/health` - Liveness probe (immediate 200, no checks)
//! - `/readyz` - Readiness probe (store connection state)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog_core::storage::ConnectionState;

use crate::state::AppState;

/// GET /health - Basic liveness probe.
#[axum::debug_handler]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// GET /readyz - Readiness probe.
///
/// Returns 200 while the store connection is ready, 503 otherwise. Does not
/// send a statement to the cluster.
#[axum::debug_handler]
pub async fn readyz(State(state): State<AppState>) -> Response {
    let connection_state = state.connection.state();

    let status_code = if connection_state == ConnectionState::Ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(serde_json::json!({
            "status": connection_state.to_string(),
            "keyspace": state.connection.keyspace().as_str(),
            "contact_points": state.connection.contact_points(),
        })),
    )
        .into_response()
}
