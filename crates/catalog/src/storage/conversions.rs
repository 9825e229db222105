//! Conversions between products and CQL values.
//!
//! Pure functions, testable without a cluster. Rows are mapped strictly:
//! a missing, null or mistyped column is a [`StoreError::Mapping`].

use catalog_core::product::{Product, ProductRecord};
use catalog_core::storage::{ColumnValue, Row, StoreError};
use uuid::Uuid;

/// Values for the insert statement, in bind order `(id, name, sku, price)`.
pub fn product_to_values(product: &Product) -> Vec<ColumnValue> {
    vec![
        ColumnValue::Uuid(product.id()),
        ColumnValue::Text(product.name().to_string()),
        ColumnValue::Text(product.sku().to_string()),
        ColumnValue::Double(product.price()),
    ]
}

/// Maps a product row into a record.
pub fn row_to_record(row: &Row) -> Result<ProductRecord, StoreError> {
    Ok(ProductRecord {
        id: get_uuid(row, "id")?,
        name: get_text(row, "name")?,
        sku: get_text(row, "sku")?,
        price: get_double(row, "price")?,
    })
}

fn get_column<'a>(row: &'a Row, column: &'static str) -> Result<&'a ColumnValue, StoreError> {
    match row.get(column) {
        None => Err(StoreError::Mapping {
            column,
            reason: "is missing".to_string(),
        }),
        Some(ColumnValue::Null) => Err(StoreError::Mapping {
            column,
            reason: "is null".to_string(),
        }),
        Some(value) => Ok(value),
    }
}

fn mistyped(column: &'static str, value: &ColumnValue, expected: &str) -> StoreError {
    StoreError::Mapping {
        column,
        reason: format!("has type {} (expected {expected})", value.type_name()),
    }
}

fn get_uuid(row: &Row, column: &'static str) -> Result<Uuid, StoreError> {
    match get_column(row, column)? {
        ColumnValue::Uuid(id) => Ok(*id),
        other => Err(mistyped(column, other, "uuid")),
    }
}

fn get_text(row: &Row, column: &'static str) -> Result<String, StoreError> {
    match get_column(row, column)? {
        ColumnValue::Text(text) => Ok(text.clone()),
        other => Err(mistyped(column, other, "text")),
    }
}

// Tables created by older tooling may use `float` for price.
fn get_double(row: &Row, column: &'static str) -> Result<f64, StoreError> {
    match get_column(row, column)? {
        ColumnValue::Double(value) => Ok(*value),
        ColumnValue::Float(value) => Ok(f64::from(*value)),
        other => Err(mistyped(column, other, "double")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::product_row;

    #[test]
    fn test_product_to_values_bind_order() {
        let id = Uuid::new_v4();
        let product = Product::new(id, "Test Laptop", "LAP-TEST-001", 1299.99).unwrap();

        let values = product_to_values(&product);

        assert_eq!(
            values,
            vec![
                ColumnValue::Uuid(id),
                ColumnValue::Text("Test Laptop".to_string()),
                ColumnValue::Text("LAP-TEST-001".to_string()),
                ColumnValue::Double(1299.99),
            ]
        );
    }

    #[test]
    fn test_row_to_record() {
        let id = Uuid::new_v4();
        let record = row_to_record(&product_row(id, "Laptop", "LAP-001", 999.99)).unwrap();

        assert_eq!(
            record,
            ProductRecord {
                id,
                name: "Laptop".to_string(),
                sku: "LAP-001".to_string(),
                price: 999.99,
            }
        );
    }

    #[test]
    fn test_row_to_record_accepts_float_price() {
        let row = Row::new()
            .with("id", ColumnValue::Uuid(Uuid::nil()))
            .with("name", ColumnValue::Text("Cable".to_string()))
            .with("sku", ColumnValue::Text("CAB-003".to_string()))
            .with("price", ColumnValue::Float(12.5));

        assert_eq!(row_to_record(&row).unwrap().price, 12.5);
    }

    #[test]
    fn test_row_to_record_missing_column() {
        let row = Row::new()
            .with("id", ColumnValue::Uuid(Uuid::nil()))
            .with("name", ColumnValue::Text("Cable".to_string()))
            .with("price", ColumnValue::Double(1.0));

        assert_eq!(
            row_to_record(&row),
            Err(StoreError::Mapping {
                column: "sku",
                reason: "is missing".to_string(),
            })
        );
    }

    #[test]
    fn test_row_to_record_null_column() {
        let row = Row::new()
            .with("id", ColumnValue::Uuid(Uuid::nil()))
            .with("name", ColumnValue::Null)
            .with("sku", ColumnValue::Text("CAB-003".to_string()))
            .with("price", ColumnValue::Double(1.0));

        assert_eq!(
            row_to_record(&row),
            Err(StoreError::Mapping {
                column: "name",
                reason: "is null".to_string(),
            })
        );
    }

    #[test]
    fn test_row_to_record_mistyped_column() {
        let row = Row::new()
            .with("id", ColumnValue::Text("not-a-uuid".to_string()))
            .with("name", ColumnValue::Text("Cable".to_string()))
            .with("sku", ColumnValue::Text("CAB-003".to_string()))
            .with("price", ColumnValue::Double(1.0));

        assert_eq!(
            row_to_record(&row),
            Err(StoreError::Mapping {
                column: "id",
                reason: "has type text (expected uuid)".to_string(),
            })
        );
    }
}
