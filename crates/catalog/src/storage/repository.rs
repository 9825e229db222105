//! Product repository over a CQL session.
//!
//! Implements [`ProductRepository`] from `catalog_core::storage`. Every call is
//! a single statement with positional values, bounded by the connection's
//! request timeout. Nothing is retried here: the caller owns retry policy.

use std::sync::Arc;

use async_trait::async_trait;

use catalog_core::product::{Product, ProductRecord};
use catalog_core::storage::{
    insert_product_statement, select_products_statement, ProductRepository, RepositoryError,
    Result, StoreError, PRODUCTS_TABLE,
};

use super::connection::{bounded, StoreConnection};
use super::conversions::{product_to_values, row_to_record};

/// CQL-backed product repository.
pub struct CqlProductRepository {
    connection: Arc<StoreConnection>,
    insert_statement: String,
    select_statement: String,
}

impl CqlProductRepository {
    pub fn new(connection: Arc<StoreConnection>) -> Self {
        let keyspace = connection.keyspace();
        Self {
            insert_statement: insert_product_statement(keyspace),
            select_statement: select_products_statement(keyspace),
            connection,
        }
    }
}

#[async_trait]
impl ProductRepository for CqlProductRepository {
    async fn insert(&self, product: &Product) -> Result<()> {
        let session = self.connection.session()?;

        bounded(
            self.connection.request_timeout(),
            session.execute(&self.insert_statement, product_to_values(product)),
        )
        .await
        .map_err(|source| {
            tracing::error!(
                operation = "insert",
                table = PRODUCTS_TABLE,
                product_id = %product.id(),
                error = %source,
                "Store write failed"
            );
            RepositoryError::WriteFailed {
                table: PRODUCTS_TABLE,
                source,
            }
        })?;

        tracing::debug!(product_id = %product.id(), sku = %product.sku(), "Inserted product");
        Ok(())
    }

    async fn select_all(&self) -> Result<Vec<ProductRecord>> {
        let session = self.connection.session()?;

        let read_failed = |source: StoreError| {
            tracing::error!(
                operation = "select_all",
                table = PRODUCTS_TABLE,
                error = %source,
                "Store read failed"
            );
            RepositoryError::ReadFailed {
                table: PRODUCTS_TABLE,
                source,
            }
        };

        let rows = bounded(
            self.connection.request_timeout(),
            session.execute(&self.select_statement, Vec::new()),
        )
        .await
        .map_err(read_failed)?;

        let records = rows
            .iter()
            .map(row_to_record)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(read_failed)?;

        tracing::debug!(count = records.len(), "Selected products");
        Ok(records)
    }

    async fn close(&self) {
        self.connection.close().await;
    }
}
