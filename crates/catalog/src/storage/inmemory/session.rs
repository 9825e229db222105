use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use catalog_core::storage::{
    ColumnValue, CqlSession, RepositoryError, Row, SessionConnector, StoreConfig, StoreError,
};

#[derive(Debug, Default)]
struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

#[derive(Debug, Default)]
struct Storage {
    keyspaces: HashSet<String>,
    tables: HashMap<String, Table>,
}

/// A statement understood by the in-memory session.
#[derive(Debug, PartialEq)]
enum Statement<'a> {
    CreateKeyspace {
        keyspace: &'a str,
    },
    CreateTable {
        table: &'a str,
        columns: Vec<&'a str>,
    },
    Insert {
        table: &'a str,
        columns: Vec<&'a str>,
    },
    Select {
        table: &'a str,
        columns: Vec<&'a str>,
    },
}

fn unsupported(statement: &str) -> StoreError {
    StoreError::Driver(format!("unsupported statement: {statement}"))
}

/// Splits `a, b, c` into trimmed names.
fn column_list(list: &str) -> Vec<&str> {
    list.split(',').map(str::trim).filter(|c| !c.is_empty()).collect()
}

fn parse(statement: &str) -> Result<Statement<'_>, StoreError> {
    let text = statement.trim();

    if let Some(rest) = text.strip_prefix("CREATE KEYSPACE IF NOT EXISTS ") {
        let keyspace = rest
            .split_whitespace()
            .next()
            .ok_or_else(|| unsupported(statement))?;
        return Ok(Statement::CreateKeyspace { keyspace });
    }

    if let Some(rest) = text.strip_prefix("CREATE TABLE IF NOT EXISTS ") {
        let (table, definition) = rest.split_once('(').ok_or_else(|| unsupported(statement))?;
        let definition = definition
            .strip_suffix(')')
            .ok_or_else(|| unsupported(statement))?;
        let columns = definition
            .split(',')
            .filter_map(|column| column.split_whitespace().next())
            .collect();
        return Ok(Statement::CreateTable {
            table: table.trim(),
            columns,
        });
    }

    if let Some(rest) = text.strip_prefix("INSERT INTO ") {
        let (table, rest) = rest.split_once('(').ok_or_else(|| unsupported(statement))?;
        let (columns, _) = rest.split_once(')').ok_or_else(|| unsupported(statement))?;
        return Ok(Statement::Insert {
            table: table.trim(),
            columns: column_list(columns),
        });
    }

    if let Some(rest) = text.strip_prefix("SELECT ") {
        let (columns, table) = rest
            .split_once(" FROM ")
            .ok_or_else(|| unsupported(statement))?;
        let table = table
            .split_whitespace()
            .next()
            .ok_or_else(|| unsupported(statement))?;
        return Ok(Statement::Select {
            table,
            columns: column_list(columns),
        });
    }

    Err(unsupported(statement))
}

/// Session backed by in-memory tables.
#[derive(Debug, Default)]
pub struct InMemorySession {
    storage: RwLock<Storage>,
    closed: AtomicBool,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Closed);
        }
        Ok(())
    }
}

fn keyspace_of(table: &str) -> Option<&str> {
    table.split_once('.').map(|(keyspace, _)| keyspace)
}

#[async_trait]
impl CqlSession for InMemorySession {
    async fn execute(
        &self,
        statement: &str,
        values: Vec<ColumnValue>,
    ) -> Result<Vec<Row>, StoreError> {
        self.ensure_open()?;

        match parse(statement)? {
            Statement::CreateKeyspace { keyspace } => {
                self.storage
                    .write()
                    .await
                    .keyspaces
                    .insert(keyspace.to_string());
                Ok(Vec::new())
            }
            Statement::CreateTable { table, columns } => {
                let mut storage = self.storage.write().await;
                let keyspace = keyspace_of(table).ok_or_else(|| unsupported(statement))?;
                if !storage.keyspaces.contains(keyspace) {
                    return Err(StoreError::Driver(format!(
                        "Keyspace '{keyspace}' does not exist"
                    )));
                }
                storage
                    .tables
                    .entry(table.to_string())
                    .or_insert_with(|| Table {
                        columns: columns.iter().map(|c| c.to_string()).collect(),
                        rows: Vec::new(),
                    });
                Ok(Vec::new())
            }
            Statement::Insert { table, columns } => {
                if columns.len() != values.len() {
                    return Err(StoreError::Driver(format!(
                        "expected {} bound values, got {}",
                        columns.len(),
                        values.len()
                    )));
                }
                let mut storage = self.storage.write().await;
                let table = storage
                    .tables
                    .get_mut(table)
                    .ok_or_else(|| StoreError::Driver(format!("unconfigured table {table}")))?;

                let row: Row = columns
                    .iter()
                    .map(|c| c.to_string())
                    .zip(values)
                    .collect();

                // The first declared column is the primary key; inserts upsert.
                let key = table.columns.first().and_then(|name| row.get(name)).cloned();
                let existing = table.rows.iter().position(|stored| {
                    key.is_some()
                        && table
                            .columns
                            .first()
                            .and_then(|name| stored.get(name))
                            == key.as_ref()
                });
                match existing {
                    Some(index) => table.rows[index] = row,
                    None => table.rows.push(row),
                }
                Ok(Vec::new())
            }
            Statement::Select { table, columns } => {
                let storage = self.storage.read().await;
                let table = storage
                    .tables
                    .get(table)
                    .ok_or_else(|| StoreError::Driver(format!("unconfigured table {table}")))?;

                let projection: Vec<&str> = if columns == ["*"] {
                    table.columns.iter().map(String::as_str).collect()
                } else {
                    columns
                };

                Ok(table
                    .rows
                    .iter()
                    .map(|row| {
                        projection
                            .iter()
                            .map(|name| {
                                let value = row.get(name).cloned().unwrap_or(ColumnValue::Null);
                                (name.to_string(), value)
                            })
                            .collect::<Row>()
                    })
                    .collect())
            }
        }
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

/// Connector that opens a fresh in-memory session per attempt.
#[derive(Debug, Default, Clone)]
pub struct InMemoryConnector;

#[async_trait]
impl SessionConnector for InMemoryConnector {
    async fn open(&self, config: &StoreConfig) -> Result<Arc<dyn CqlSession>, RepositoryError> {
        tracing::debug!(
            contact_points = ?config.contact_points,
            "Opening in-memory session (contact points ignored)"
        );
        Ok(Arc::new(InMemorySession::new()))
    }
}
