use uuid::Uuid;

use super::error::ValidationError;
use super::requests::CreateProductRequest;
use super::types::Product;

/// Validates a product name, returning it trimmed.
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name.to_string())
}

/// Validates a SKU, returning it trimmed.
pub fn validate_sku(sku: &str) -> Result<String, ValidationError> {
    let sku = sku.trim();
    if sku.is_empty() {
        return Err(ValidationError::EmptySku);
    }
    Ok(sku.to_string())
}

/// Validates a price: present, finite and non-negative.
pub fn validate_price(price: Option<f64>) -> Result<f64, ValidationError> {
    let price = price.ok_or(ValidationError::MissingPrice)?;
    if !price.is_finite() {
        return Err(ValidationError::NonFinitePrice);
    }
    if price < 0.0 {
        return Err(ValidationError::NegativePrice(price));
    }
    Ok(price)
}

/// Builds a product from a create request, assigning the given id.
///
/// Fields are checked in declaration order (name, sku, price) and the first
/// failure is returned.
pub fn build_product(request: CreateProductRequest, id: Uuid) -> Result<Product, ValidationError> {
    let name = request.name.ok_or(ValidationError::EmptyName)?;
    let sku = request.sku.ok_or(ValidationError::EmptySku)?;
    let price = validate_price(request.price)?;

    Product::new(id, name, sku, price)
}
