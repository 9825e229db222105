use std::sync::Arc;

use async_trait::async_trait;

use crate::product::{Product, ProductRecord};

use super::{ColumnValue, RepositoryError, Result, Row, StoreConfig, StoreError};

/// A session against a CQL cluster.
///
/// Implementations must be safe to share between concurrent requests; the
/// driver session pools and multiplexes connections internally.
#[async_trait]
pub trait CqlSession: Send + Sync {
    /// Executes one statement with positional values bound in order.
    ///
    /// Statements that produce no rows return an empty vector.
    async fn execute(
        &self,
        statement: &str,
        values: Vec<ColumnValue>,
    ) -> std::result::Result<Vec<Row>, StoreError>;

    /// Releases the session's network resources. Calling it again is a no-op.
    async fn close(&self);
}

/// Opens sessions against a cluster.
#[async_trait]
pub trait SessionConnector: Send + Sync {
    /// Makes one connection attempt using every configured contact point.
    ///
    /// Returns `ConnectionFailed` or `AuthenticationFailed` on error.
    async fn open(
        &self,
        config: &StoreConfig,
    ) -> std::result::Result<Arc<dyn CqlSession>, RepositoryError>;
}

/// Repository for product operations.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persists a product with a single write.
    async fn insert(&self, product: &Product) -> Result<()>;

    /// Returns every stored product, in the order the store returns them.
    async fn select_all(&self) -> Result<Vec<ProductRecord>>;

    /// Releases the underlying connection.
    async fn close(&self);
}
