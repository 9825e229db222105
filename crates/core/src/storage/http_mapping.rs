//! Pure functions for mapping repository errors to HTTP status codes.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `ConnectionFailed`, `AuthenticationFailed`, `SchemaFailed`,
///   `NotConnected` -> 503 (Service Unavailable)
/// - `WriteFailed` / `ReadFailed` caused by a timeout -> 504 (Gateway Timeout)
/// - any other `WriteFailed` / `ReadFailed` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use catalog_core::storage::{repository_error_to_status_code, RepositoryError, StoreError};
///
/// let error = RepositoryError::WriteFailed {
///     table: "products",
///     source: StoreError::Driver("coordinator error".to_string()),
/// };
/// assert_eq!(repository_error_to_status_code(&error), 500);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::AuthenticationFailed(_) => 503,
        RepositoryError::SchemaFailed(_) => 503,
        RepositoryError::NotConnected(_) => 503,
        RepositoryError::WriteFailed { source, .. } | RepositoryError::ReadFailed { source, .. }
            if source.is_timeout() =>
        {
            504
        }
        RepositoryError::WriteFailed { .. } => 500,
        RepositoryError::ReadFailed { .. } => 500,
    }
}
