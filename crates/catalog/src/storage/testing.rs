//! Test doubles for the store session.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use catalog_core::storage::{
    ColumnValue, CqlSession, Keyspace, RepositoryError, Row, SessionConnector, StoreConfig,
    StoreError,
};

/// A statement as it reached the session.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub statement: String,
    pub values: Vec<ColumnValue>,
}

enum Scripted {
    Respond(Result<Vec<Row>, StoreError>),
    Hang,
}

/// Session that records every call and replays scripted responses.
///
/// Calls with nothing scripted succeed with no rows.
#[derive(Default)]
pub struct RecordingSession {
    calls: Mutex<Vec<RecordedCall>>,
    script: Mutex<VecDeque<Scripted>>,
    closes: AtomicU32,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues rows for the next call.
    pub fn respond_with(self, rows: Vec<Row>) -> Self {
        self.push(Scripted::Respond(Ok(rows)));
        self
    }

    /// Queues a failure for the next call.
    pub fn fail_with(self, error: StoreError) -> Self {
        self.push(Scripted::Respond(Err(error)));
        self
    }

    /// Makes the next call never complete.
    pub fn hang(self) -> Self {
        self.push(Scripted::Hang);
        self
    }

    fn push(&self, scripted: Scripted) {
        self.script.lock().unwrap().push_back(scripted);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn close_count(&self) -> u32 {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CqlSession for RecordingSession {
    async fn execute(
        &self,
        statement: &str,
        values: Vec<ColumnValue>,
    ) -> Result<Vec<Row>, StoreError> {
        self.calls.lock().unwrap().push(RecordedCall {
            statement: statement.to_string(),
            values,
        });

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Respond(result)) => result,
            Some(Scripted::Hang) => std::future::pending().await,
            None => Ok(Vec::new()),
        }
    }

    async fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Connector that hands out the same session on every attempt.
pub struct FixedConnector(pub Arc<RecordingSession>);

#[async_trait]
impl SessionConnector for FixedConnector {
    async fn open(&self, _config: &StoreConfig) -> Result<Arc<dyn CqlSession>, RepositoryError> {
        Ok(self.0.clone())
    }
}

/// Local single-node config against the `store_manager` keyspace.
pub fn store_config() -> StoreConfig {
    StoreConfig::new(
        vec!["127.0.0.1:9042".to_string()],
        Keyspace::new("store_manager").unwrap(),
    )
    .unwrap()
    .with_connect_attempts(3, Duration::from_millis(1))
    .unwrap()
}

/// A product row as the store returns it.
pub fn product_row(id: uuid::Uuid, name: &str, sku: &str, price: f64) -> Row {
    Row::new()
        .with("id", ColumnValue::Uuid(id))
        .with("name", ColumnValue::Text(name.to_string()))
        .with("sku", ColumnValue::Text(sku.to_string()))
        .with("price", ColumnValue::Double(price))
}
