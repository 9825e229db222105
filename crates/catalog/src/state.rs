//! Shared application state handed to every request handler.

use std::sync::Arc;

use crate::{service::ProductService, storage::StoreConnection};

/// Shared application state.
///
/// Built once by `main` after the store connection is ready and the schema
/// is provisioned.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
    /// Store connection, read by the readiness probe.
    pub connection: Arc<StoreConnection>,
}

impl AppState {
    pub fn new(products: ProductService, connection: Arc<StoreConnection>) -> Self {
        Self {
            products,
            connection,
        }
    }
}
