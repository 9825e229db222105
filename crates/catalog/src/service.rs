//! Product service: validation and error classification in front of the
//! repository.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use catalog_core::product::{
    build_product, CreateProductRequest, Product, ProductRecord, ValidationError,
};
use catalog_core::storage::{repository_error_to_status_code, ProductRepository, RepositoryError};

/// Errors surfaced by the product service.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
    /// Malformed input. Never reaches the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    /// HTTP status for this error: 4xx for validation, 5xx for the store.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 400,
            ServiceError::Repository(error) => repository_error_to_status_code(error),
        }
    }
}

/// Creates and lists products through a shared repository.
#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// Validates the request, assigns a fresh id and persists the product.
    pub async fn create(&self, request: CreateProductRequest) -> Result<Product, ServiceError> {
        let product = build_product(request, Uuid::new_v4()).inspect_err(|error| {
            tracing::debug!(error = %error, "Rejected product request");
        })?;

        self.repository.insert(&product).await?;

        tracing::info!(
            product_id = %product.id(),
            sku = %product.sku(),
            "Created product"
        );
        Ok(product)
    }

    /// Lists every stored product.
    pub async fn list(&self) -> Result<Vec<ProductRecord>, ServiceError> {
        Ok(self.repository.select_all().await?)
    }
}
