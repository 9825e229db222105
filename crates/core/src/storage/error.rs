use std::time::Duration;

use thiserror::Error;

use super::types::ConnectionState;

/// Failure of a single call against the store.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("not enough replicas available: {0}")]
    Unavailable(String),
    #[error("driver error: {0}")]
    Driver(String),
    #[error("column '{column}' {reason}")]
    Mapping {
        column: &'static str,
        reason: String,
    },
    #[error("session is closed")]
    Closed,
}

impl StoreError {
    /// Returns true if the call was abandoned because it exceeded its bound.
    pub fn is_timeout(&self) -> bool {
        matches!(self, StoreError::Timeout(_))
    }
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("Schema provisioning failed: {0}")]
    SchemaFailed(StoreError),
    #[error("Not connected (connection is {0})")]
    NotConnected(ConnectionState),
    #[error("Write to {table} failed: {source}")]
    WriteFailed {
        table: &'static str,
        source: StoreError,
    },
    #[error("Read from {table} failed: {source}")]
    ReadFailed {
        table: &'static str,
        source: StoreError,
    },
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Errors raised while turning raw settings into a [`StoreConfig`](super::StoreConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("At least one contact point is required")]
    NoContactPoints,
    #[error("Invalid keyspace name: {0:?}")]
    InvalidKeyspace(String),
    #[error("Invalid replication settings: {0}")]
    InvalidReplication(String),
    #[error("Username and password must be set together")]
    IncompleteCredentials,
    #[error("Connect attempts must be at least 1")]
    NoConnectAttempts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("no contact point answered".to_string());
        assert_eq!(
            error.to_string(),
            "Connection failed: no contact point answered"
        );
    }

    #[test]
    fn test_repository_error_not_connected_display() {
        let error = RepositoryError::NotConnected(ConnectionState::Closed);
        assert_eq!(error.to_string(), "Not connected (connection is closed)");
    }

    #[test]
    fn test_repository_error_write_failed_display() {
        let error = RepositoryError::WriteFailed {
            table: "products",
            source: StoreError::Timeout(Duration::from_millis(250)),
        };
        assert_eq!(
            error.to_string(),
            "Write to products failed: request timed out after 250ms"
        );
    }

    #[test]
    fn test_repository_error_read_failed_mapping_display() {
        let error = RepositoryError::ReadFailed {
            table: "products",
            source: StoreError::Mapping {
                column: "price",
                reason: "is missing".to_string(),
            },
        };
        assert_eq!(
            error.to_string(),
            "Read from products failed: column 'price' is missing"
        );
    }

    #[test]
    fn test_store_error_is_timeout() {
        assert!(StoreError::Timeout(Duration::from_secs(1)).is_timeout());
        assert!(!StoreError::Closed.is_timeout());
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::InvalidKeyspace("bad-name".to_string()).to_string(),
            "Invalid keyspace name: \"bad-name\""
        );
    }
}
