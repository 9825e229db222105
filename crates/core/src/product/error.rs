use thiserror::Error;

/// Errors raised while validating product input, before any store interaction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Product name cannot be empty")]
    EmptyName,
    #[error("Product SKU cannot be empty")]
    EmptySku,
    #[error("Product price is required")]
    MissingPrice,
    #[error("Product price must be a finite number")]
    NonFinitePrice,
    #[error("Product price cannot be negative: {0}")]
    NegativePrice(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::EmptyName.to_string(),
            "Product name cannot be empty"
        );
        assert_eq!(
            ValidationError::EmptySku.to_string(),
            "Product SKU cannot be empty"
        );
        assert_eq!(
            ValidationError::NegativePrice(-1.5).to_string(),
            "Product price cannot be negative: -1.5"
        );
    }
}
