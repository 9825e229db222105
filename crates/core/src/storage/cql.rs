//! CQL statement text for the product table.
//!
//! Pure functions, no I/O. Values are always bound positionally; only the
//! validated keyspace name and replication map are placed into the text.

use super::{Keyspace, Replication};

/// Name of the product table inside the keyspace.
pub const PRODUCTS_TABLE: &str = "products";

/// `CREATE KEYSPACE IF NOT EXISTS` with the given replication.
pub fn create_keyspace_statement(keyspace: &Keyspace, replication: &Replication) -> String {
    format!(
        "CREATE KEYSPACE IF NOT EXISTS {keyspace} WITH replication = {}",
        replication.to_cql()
    )
}

/// `CREATE TABLE IF NOT EXISTS` for the product table.
pub fn create_products_table_statement(keyspace: &Keyspace) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {keyspace}.{PRODUCTS_TABLE} (\
         id uuid PRIMARY KEY, \
         name text, \
         sku text, \
         price double)"
    )
}

/// Insert with values bound as `(id, name, sku, price)`, in that order.
pub fn insert_product_statement(keyspace: &Keyspace) -> String {
    format!("INSERT INTO {keyspace}.{PRODUCTS_TABLE} (id, name, sku, price) VALUES (?, ?, ?, ?)")
}

/// Full scan of the product table. No ORDER BY: the store gives no global order.
pub fn select_products_statement(keyspace: &Keyspace) -> String {
    format!("SELECT id, name, sku, price FROM {keyspace}.{PRODUCTS_TABLE}")
}
