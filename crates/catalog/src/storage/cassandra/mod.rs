//! Cassandra / ScyllaDB storage backend.
//!
//! Connects through the `scylla` driver, which speaks CQL to both. The driver
//! session pools connections per node and is shared by all requests.

mod conversions;
mod error;
mod session;

pub use session::ScyllaConnector;
