//! Storage layer: connection management, schema provisioning and the
//! product repository.
//!
//! The repository and provisioner only talk to the `CqlSession` trait from
//! `catalog_core::storage`. The session backend is selected at compile time
//! via feature flags.
//!
//! # Feature Flags
//!
//! - `scylla` (default): Cassandra / ScyllaDB cluster through the `scylla` driver
//! - `inmemory`: in-process tables, no cluster required
//!
//! These features are mutually exclusive.
//!
//! # Examples
//!
//! Build against a cluster (default):
//! ```bash
//! cargo build -p catalog
//! ```
//!
//! Build with in-memory storage:
//! ```bash
//! cargo build -p catalog --no-default-features --features inmemory
//! ```

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "scylla", feature = "inmemory"))]
compile_error!(
    "Features 'scylla' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "scylla", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'scylla' or 'inmemory' feature. \
    Example: cargo build -p catalog --features scylla"
);

mod connection;
mod conversions;
mod repository;
mod schema;

#[cfg(feature = "scylla")]
pub mod cassandra;

#[cfg(any(test, feature = "inmemory"))]
pub mod inmemory;

#[cfg(test)]
pub mod testing;

use std::sync::Arc;

use catalog_core::storage::SessionConnector;

pub use connection::{ConnectionManager, StoreConnection};
pub use repository::CqlProductRepository;
pub use schema::ensure_schema;

/// Returns the connector for the compiled-in backend.
pub fn default_connector() -> Arc<dyn SessionConnector> {
    #[cfg(feature = "scylla")]
    let connector: Arc<dyn SessionConnector> = Arc::new(cassandra::ScyllaConnector);

    #[cfg(all(feature = "inmemory", not(feature = "scylla")))]
    let connector: Arc<dyn SessionConnector> = Arc::new(inmemory::InMemoryConnector);

    connector
}
