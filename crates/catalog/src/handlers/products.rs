//! Product API handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use catalog_core::product::CreateProductRequest;

use crate::{handlers::AppError, state::AppState};

/// GET /products - List all products.
#[axum::debug_handler]
pub async fn list_products(State(state): State<AppState>) -> Result<Response, AppError> {
    let products = state.products.list().await?;

    Ok(Json(products).into_response())
}

/// POST /products - Create a new product.
///
/// Returns 201 with the created product, including its generated id.
#[axum::debug_handler]
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<Response, AppError> {
    let product = state.products.create(request).await?;

    Ok((StatusCode::CREATED, Json(product)).into_response())
}
