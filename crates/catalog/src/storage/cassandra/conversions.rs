//! Conversions between catalog column values and driver values.

use catalog_core::storage::{ColumnValue, Row};
use scylla::value::CqlValue;

/// Converts a bound value. `Null` becomes an unset (`None`) value.
pub fn to_cql_value(value: ColumnValue) -> Option<CqlValue> {
    match value {
        ColumnValue::Uuid(id) => Some(CqlValue::Uuid(id)),
        ColumnValue::Text(text) => Some(CqlValue::Text(text)),
        ColumnValue::Double(value) => Some(CqlValue::Double(value)),
        ColumnValue::Float(value) => Some(CqlValue::Float(value)),
        ColumnValue::Null | ColumnValue::Unsupported(_) => None,
    }
}

/// Converts a value read from a row.
pub fn from_cql_value(value: Option<CqlValue>) -> ColumnValue {
    match value {
        None | Some(CqlValue::Empty) => ColumnValue::Null,
        Some(CqlValue::Uuid(id)) => ColumnValue::Uuid(id),
        Some(CqlValue::Text(text)) | Some(CqlValue::Ascii(text)) => ColumnValue::Text(text),
        Some(CqlValue::Double(value)) => ColumnValue::Double(value),
        Some(CqlValue::Float(value)) => ColumnValue::Float(value),
        Some(other) => ColumnValue::Unsupported(format!("{other:?}")),
    }
}

/// Pairs driver columns with their names.
pub fn to_row(names: &[String], columns: Vec<Option<CqlValue>>) -> Row {
    names
        .iter()
        .cloned()
        .zip(columns.into_iter().map(from_cql_value))
        .collect()
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_bound_values_convert() {
        let id = Uuid::new_v4();
        assert_eq!(to_cql_value(ColumnValue::Uuid(id)), Some(CqlValue::Uuid(id)));
        assert_eq!(
            to_cql_value(ColumnValue::Text("LAP-001".to_string())),
            Some(CqlValue::Text("LAP-001".to_string()))
        );
        assert_eq!(
            to_cql_value(ColumnValue::Double(29.99)),
            Some(CqlValue::Double(29.99))
        );
        assert_eq!(to_cql_value(ColumnValue::Null), None);
    }

    #[test]
    fn test_row_values_convert() {
        assert_eq!(from_cql_value(None), ColumnValue::Null);
        assert_eq!(
            from_cql_value(Some(CqlValue::Ascii("SKU".to_string()))),
            ColumnValue::Text("SKU".to_string())
        );
        assert_eq!(
            from_cql_value(Some(CqlValue::Int(7))).type_name(),
            "unsupported"
        );
    }

    #[test]
    fn test_to_row_pairs_names_and_values() {
        let names = vec!["name".to_string(), "price".to_string()];
        let row = to_row(
            &names,
            vec![Some(CqlValue::Text("Laptop".to_string())), Some(CqlValue::Double(1.0))],
        );

        assert_eq!(row.get("name"), Some(&ColumnValue::Text("Laptop".to_string())));
        assert_eq!(row.get("price"), Some(&ColumnValue::Double(1.0)));
    }
}
