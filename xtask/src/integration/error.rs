//! Error types for integration test operations.

use thiserror::Error;

use crate::containers::ContainerError;

/// Result type alias for integration module.
pub type Result<T> = std::result::Result<T, IntegrationError>;

/// Errors that can occur during integration test operations.
#[derive(Error, Debug)]
pub enum IntegrationError {
    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error("Server did not become healthy within {0}s")]
    ServerNotReady(u64),

    #[error("Smoke check failed: {0}")]
    CheckFailed(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
