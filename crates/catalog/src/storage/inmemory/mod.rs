//! In-memory storage backend.
//!
//! Interprets the handful of CQL statements the service issues, against
//! tables held in memory. Used to run the service without a cluster and by
//! the router tests. Data is lost when the session is dropped.

mod session;

pub use session::InMemoryConnector;
