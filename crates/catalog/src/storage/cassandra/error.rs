//! Driver error mapping.
//!
//! Maps `scylla` errors to `StoreError` / `RepositoryError` from
//! `catalog_core::storage`. Classification of connect failures works on the
//! rendered message, since authentication rejections arrive nested inside
//! connection pool errors.

use catalog_core::storage::{RepositoryError, StoreError};
use scylla::errors::{ExecutionError, NewSessionError};

/// Maps a failed session build to a connection or authentication error.
pub fn map_new_session_error(err: NewSessionError) -> RepositoryError {
    classify_connect_failure(&err.to_string())
}

/// Maps a failed statement execution to a store error.
pub fn map_execution_error(err: ExecutionError) -> StoreError {
    match err {
        ExecutionError::RequestTimeout(limit) => StoreError::Timeout(limit),
        other => classify_execution_failure(&other.to_string()),
    }
}

fn classify_connect_failure(message: &str) -> RepositoryError {
    let lowered = message.to_lowercase();
    let rejected = ["authenticat", "credentials", "password"]
        .iter()
        .any(|marker| lowered.contains(marker));

    if rejected {
        RepositoryError::AuthenticationFailed(message.to_string())
    } else {
        RepositoryError::ConnectionFailed(message.to_string())
    }
}

fn classify_execution_failure(message: &str) -> StoreError {
    let lowered = message.to_lowercase();
    if lowered.contains("not enough nodes are alive") || lowered.contains("unavailable") {
        StoreError::Unavailable(message.to_string())
    } else {
        StoreError::Driver(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_credentials_map_to_authentication_failed() {
        let error = classify_connect_failure(
            "Control connection pool error: Authentication failed: \
             Provided username cassandra and/or password are incorrect",
        );
        assert!(matches!(error, RepositoryError::AuthenticationFailed(_)));
    }

    #[test]
    fn test_refused_connection_maps_to_connection_failed() {
        let error = classify_connect_failure(
            "Could not connect to any of the known nodes: Connection refused (os error 111)",
        );
        assert!(matches!(error, RepositoryError::ConnectionFailed(_)));
    }

    #[test]
    fn test_unavailable_replicas_map_to_unavailable() {
        let error = classify_execution_failure(
            "Database returned an error: Not enough nodes are alive to satisfy required \
             consistency level (consistency: Quorum, required: 2, alive: 1)",
        );
        assert!(matches!(error, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_other_execution_failures_map_to_driver() {
        let error = classify_execution_failure("Database returned an error: Invalid query");
        assert_eq!(
            error,
            StoreError::Driver("Database returned an error: Invalid query".to_string())
        );
    }
}
