use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValidationError;
use super::operations::{validate_name, validate_price, validate_sku};

/// A catalog product ready to be persisted.
///
/// Fields are private: a `Product` can only be built through [`Product::new`],
/// which enforces the catalog invariants, and it is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: Uuid,
    name: String,
    sku: String,
    price: f64,
}

impl Product {
    /// Creates a validated product with the given identifier.
    ///
    /// Name and SKU are trimmed. Fails if either is empty or if the price is
    /// negative or not finite.
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        sku: impl Into<String>,
        price: f64,
    ) -> Result<Self, ValidationError> {
        let name = validate_name(&name.into())?;
        let sku = validate_sku(&sku.into())?;
        let price = validate_price(Some(price))?;

        Ok(Self {
            id,
            name,
            sku,
            price,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}

/// A product as read back from the store.
///
/// Records are rebuilt from each returned row and share nothing with the
/// value that was written. They are not re-validated: rows written by other
/// tooling are reported as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub price: f64,
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            sku: product.sku.clone(),
            price: product.price,
        }
    }
}
