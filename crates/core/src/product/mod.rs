mod error;
mod operations;
mod requests;
mod types;

pub use error::ValidationError;
pub use operations::{build_product, validate_name, validate_price, validate_sku};
pub use requests::CreateProductRequest;
pub use types::{Product, ProductRecord};
