//! `scylla` driver session behind the [`CqlSession`] trait.

use std::sync::Arc;

use async_trait::async_trait;
use scylla::client::caching_session::CachingSession;
use scylla::client::session_builder::SessionBuilder;
use scylla::errors::IntoRowsResultError;
use scylla::value::{CqlValue, Row as DriverRow};
use tokio::sync::RwLock;

use catalog_core::storage::{
    ColumnValue, CqlSession, RepositoryError, Row, SessionConnector, StoreConfig, StoreError,
};

use super::conversions::{to_cql_value, to_row};
use super::error::{map_execution_error, map_new_session_error};

/// Prepared statements kept per session. The service issues two.
const PREPARED_CACHE_SIZE: usize = 16;

/// Opens driver sessions from a [`StoreConfig`].
#[derive(Debug, Default, Clone)]
pub struct ScyllaConnector;

#[async_trait]
impl SessionConnector for ScyllaConnector {
    async fn open(&self, config: &StoreConfig) -> Result<Arc<dyn CqlSession>, RepositoryError> {
        let mut builder = SessionBuilder::new()
            .known_nodes(&config.contact_points)
            .connection_timeout(config.connect_timeout);

        if let Some(credentials) = &config.credentials {
            builder = builder.user(&credentials.username, &credentials.password);
        }

        let session = builder.build().await.map_err(map_new_session_error)?;

        Ok(Arc::new(ScyllaSession::new(CachingSession::from(
            session,
            PREPARED_CACHE_SIZE,
        ))))
    }
}

/// Driver session that can be released while still shared.
///
/// Calls clone the inner `Arc` under a read lock and release it before
/// executing, so concurrent statements never wait on each other.
pub struct ScyllaSession {
    inner: RwLock<Option<Arc<CachingSession>>>,
}

impl ScyllaSession {
    pub fn new(session: CachingSession) -> Self {
        Self {
            inner: RwLock::new(Some(Arc::new(session))),
        }
    }

    async fn current(&self) -> Result<Arc<CachingSession>, StoreError> {
        self.inner.read().await.clone().ok_or(StoreError::Closed)
    }
}

#[async_trait]
impl CqlSession for ScyllaSession {
    async fn execute(
        &self,
        statement: &str,
        values: Vec<ColumnValue>,
    ) -> Result<Vec<Row>, StoreError> {
        let session = self.current().await?;

        // Statements without values (DDL, full scans) go unprepared; the rest
        // are prepared once and cached.
        let result = if values.is_empty() {
            session
                .get_session()
                .query_unpaged(statement, ())
                .await
                .map_err(map_execution_error)?
        } else {
            let values: Vec<Option<CqlValue>> = values.into_iter().map(to_cql_value).collect();
            session
                .execute_unpaged(statement, values)
                .await
                .map_err(map_execution_error)?
        };

        let rows_result = match result.into_rows_result() {
            Ok(rows_result) => rows_result,
            Err(IntoRowsResultError::ResultNotRows(_)) => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::Driver(err.to_string())),
        };

        let names: Vec<String> = rows_result
            .column_specs()
            .iter()
            .map(|spec| spec.name().to_string())
            .collect();

        let mut rows = Vec::new();
        for row in rows_result
            .rows::<DriverRow>()
            .map_err(|err| StoreError::Driver(err.to_string()))?
        {
            let row = row.map_err(|err| StoreError::Driver(err.to_string()))?;
            rows.push(to_row(&names, row.columns));
        }
        Ok(rows)
    }

    async fn close(&self) {
        // Dropping the last reference shuts down the driver's connection pools.
        self.inner.write().await.take();
    }
}
