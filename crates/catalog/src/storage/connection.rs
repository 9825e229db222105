//! Connection manager for the distributed store.
//!
//! [`ConnectionManager::connect`] runs the `Disconnected -> Connecting ->
//! Ready` transition and only hands out a [`StoreConnection`] once a session
//! is open, so callers never observe a half-initialized connection.

use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use catalog_core::storage::{
    ConnectionState, CqlSession, Keyspace, RepositoryError, Result, SessionConnector,
    StoreConfig, StoreError,
};

/// Runs a store call, failing with [`StoreError::Timeout`] once `limit` elapses.
pub async fn bounded<T, F>(limit: Duration, call: F) -> std::result::Result<T, StoreError>
where
    F: Future<Output = std::result::Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout(limit)),
    }
}

/// Opens connections with a bounded number of attempts.
#[derive(Clone)]
pub struct ConnectionManager {
    connector: Arc<dyn SessionConnector>,
}

impl ConnectionManager {
    pub fn new(connector: Arc<dyn SessionConnector>) -> Self {
        Self { connector }
    }

    /// Connects to the cluster.
    ///
    /// Each attempt hands every contact point, in configured order, to the
    /// connector and is bounded by `connect_timeout`. Authentication failures
    /// are returned immediately; other failures are retried up to
    /// `connect_attempts` times before `ConnectionFailed` is returned.
    pub async fn connect(&self, config: &StoreConfig) -> Result<StoreConnection> {
        let contact_points = config.contact_points.join(",");
        let mut last_failure = String::from("no attempt made");

        for attempt in 1..=config.connect_attempts {
            tracing::debug!(
                attempt,
                max_attempts = config.connect_attempts,
                contact_points = %contact_points,
                state = %ConnectionState::Connecting,
                "Connecting to store"
            );

            match tokio::time::timeout(config.connect_timeout, self.connector.open(config)).await {
                Ok(Ok(session)) => {
                    tracing::info!(
                        attempt,
                        contact_points = %contact_points,
                        keyspace = %config.keyspace,
                        "Connected to store"
                    );
                    return Ok(StoreConnection::ready(session, config));
                }
                Ok(Err(RepositoryError::AuthenticationFailed(reason))) => {
                    tracing::error!(
                        contact_points = %contact_points,
                        reason = %reason,
                        "Store rejected credentials"
                    );
                    return Err(RepositoryError::AuthenticationFailed(reason));
                }
                Ok(Err(RepositoryError::ConnectionFailed(reason))) => last_failure = reason,
                Ok(Err(other)) => last_failure = other.to_string(),
                Err(_) => {
                    last_failure = format!(
                        "no contact point answered within {:?}",
                        config.connect_timeout
                    )
                }
            }

            tracing::warn!(
                attempt,
                max_attempts = config.connect_attempts,
                reason = %last_failure,
                state = %ConnectionState::Disconnected,
                "Connection attempt failed"
            );

            if attempt < config.connect_attempts {
                tokio::time::sleep(config.connect_retry_delay).await;
            }
        }

        Err(RepositoryError::ConnectionFailed(format!(
            "{contact_points} unreachable after {} attempt(s): {last_failure}",
            config.connect_attempts
        )))
    }
}

/// An open cluster/session pair.
///
/// Shared behind an `Arc` by every repository call. The session itself is
/// never locked; only the lifecycle state is tracked, atomically.
pub struct StoreConnection {
    session: Arc<dyn CqlSession>,
    contact_points: Vec<String>,
    keyspace: Keyspace,
    request_timeout: Duration,
    state: AtomicU8,
}

impl StoreConnection {
    fn ready(session: Arc<dyn CqlSession>, config: &StoreConfig) -> Self {
        Self {
            session,
            contact_points: config.contact_points.clone(),
            keyspace: config.keyspace.clone(),
            request_timeout: config.request_timeout,
            state: AtomicU8::new(ConnectionState::Ready as u8),
        }
    }

    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn keyspace(&self) -> &Keyspace {
        &self.keyspace
    }

    pub fn contact_points(&self) -> &[String] {
        &self.contact_points
    }

    /// Bound applied to every statement sent through this connection.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Returns the session if the connection is `Ready`.
    pub fn session(&self) -> Result<Arc<dyn CqlSession>> {
        match self.state() {
            ConnectionState::Ready => Ok(Arc::clone(&self.session)),
            state => Err(RepositoryError::NotConnected(state)),
        }
    }

    /// Closes the session. Only the first call does anything.
    pub async fn close(&self) {
        let previous = self
            .state
            .swap(ConnectionState::Closed as u8, Ordering::AcqRel);

        if ConnectionState::from_u8(previous) == ConnectionState::Closed {
            return;
        }

        self.session.close().await;
        tracing::info!(keyspace = %self.keyspace, "Store connection closed");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicU32;

    use async_trait::async_trait;

    use super::*;
    use crate::storage::testing::{store_config, RecordingSession};

    /// Connector that fails a fixed number of times before succeeding.
    struct FlakyConnector {
        failures: u32,
        error: RepositoryError,
        attempts: AtomicU32,
        session: Arc<RecordingSession>,
    }

    impl FlakyConnector {
        fn new(failures: u32, error: RepositoryError) -> Self {
            Self {
                failures,
                error,
                attempts: AtomicU32::new(0),
                session: Arc::new(RecordingSession::new()),
            }
        }

        fn attempts(&self) -> u32 {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SessionConnector for FlakyConnector {
        async fn open(
            &self,
            _config: &StoreConfig,
        ) -> std::result::Result<Arc<dyn CqlSession>, RepositoryError> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt <= self.failures {
                return Err(self.error.clone());
            }
            Ok(self.session.clone())
        }
    }

    /// Connector whose attempts never complete.
    struct HangingConnector;

    #[async_trait]
    impl SessionConnector for HangingConnector {
        async fn open(
            &self,
            _config: &StoreConfig,
        ) -> std::result::Result<Arc<dyn CqlSession>, RepositoryError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_connect_returns_ready_connection() {
        let connector = Arc::new(FlakyConnector::new(
            0,
            RepositoryError::ConnectionFailed("unused".to_string()),
        ));
        let manager = ConnectionManager::new(connector.clone());

        let connection = manager.connect(&store_config()).await.unwrap();

        assert_eq!(connection.state(), ConnectionState::Ready);
        assert_eq!(connection.keyspace().as_str(), "store_manager");
        assert_eq!(connection.contact_points(), ["127.0.0.1:9042".to_string()]);
        assert_eq!(connector.attempts(), 1);
        assert!(connection.session().is_ok());
    }

    #[tokio::test]
    async fn test_connect_retries_transient_failures() {
        let connector = Arc::new(FlakyConnector::new(
            2,
            RepositoryError::ConnectionFailed("connection refused".to_string()),
        ));
        let manager = ConnectionManager::new(connector.clone());

        let connection = manager.connect(&store_config()).await.unwrap();

        assert_eq!(connection.state(), ConnectionState::Ready);
        assert_eq!(connector.attempts(), 3);
    }

    #[tokio::test]
    async fn test_connect_gives_up_after_bounded_attempts() {
        let connector = Arc::new(FlakyConnector::new(
            u32::MAX,
            RepositoryError::ConnectionFailed("connection refused".to_string()),
        ));
        let manager = ConnectionManager::new(connector.clone());

        let error = manager.connect(&store_config()).await.err().unwrap();

        assert_eq!(connector.attempts(), 3);
        match error {
            RepositoryError::ConnectionFailed(reason) => {
                assert!(reason.contains("127.0.0.1:9042"));
                assert!(reason.contains("3 attempt(s)"));
                assert!(reason.contains("connection refused"));
            }
            other => panic!("Expected ConnectionFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connect_does_not_retry_authentication_failures() {
        let connector = Arc::new(FlakyConnector::new(
            u32::MAX,
            RepositoryError::AuthenticationFailed("bad credentials".to_string()),
        ));
        let manager = ConnectionManager::new(connector.clone());

        let error = manager.connect(&store_config()).await.err().unwrap();

        assert_eq!(
            error,
            RepositoryError::AuthenticationFailed("bad credentials".to_string())
        );
        assert_eq!(connector.attempts(), 1);
    }

    #[tokio::test]
    async fn test_connect_attempts_are_bounded_by_timeout() {
        let config = store_config()
            .with_connect_timeout(Duration::from_millis(20))
            .with_connect_attempts(2, Duration::from_millis(1))
            .unwrap();
        let manager = ConnectionManager::new(Arc::new(HangingConnector));

        let started = std::time::Instant::now();
        let error = manager.connect(&config).await.err().unwrap();

        assert!(matches!(error, RepositoryError::ConnectionFailed(_)));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let connector = Arc::new(FlakyConnector::new(
            0,
            RepositoryError::ConnectionFailed("unused".to_string()),
        ));
        let session = connector.session.clone();
        let connection = ConnectionManager::new(connector)
            .connect(&store_config())
            .await
            .unwrap();

        connection.close().await;
        connection.close().await;

        assert_eq!(connection.state(), ConnectionState::Closed);
        assert_eq!(session.close_count(), 1);
        assert_eq!(
            connection.session().err(),
            Some(RepositoryError::NotConnected(ConnectionState::Closed))
        );
    }

    #[tokio::test]
    async fn test_bounded_times_out_hanging_call() {
        let result: std::result::Result<(), StoreError> =
            bounded(Duration::from_millis(10), std::future::pending()).await;

        assert_eq!(result, Err(StoreError::Timeout(Duration::from_millis(10))));
    }
}
