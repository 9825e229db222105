//! API request types for product operations.
//!
//! Every field is optional so that missing input surfaces as a
//! [`ValidationError`](super::ValidationError) instead of a decoding failure.

use serde::{Deserialize, Serialize};

/// Request payload for creating a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateProductRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl CreateProductRequest {
    /// Create a request with every field set.
    pub fn new(name: impl Into<String>, sku: impl Into<String>, price: f64) -> Self {
        Self {
            name: Some(name.into()),
            sku: Some(sku.into()),
            price: Some(price),
        }
    }
}
