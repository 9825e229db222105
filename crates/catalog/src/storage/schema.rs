//! Schema provisioning.
//!
//! Runs once at startup, before the service accepts traffic. Both statements
//! use `IF NOT EXISTS`, so provisioning an existing schema is a no-op.

use catalog_core::storage::{
    create_keyspace_statement, create_products_table_statement, RepositoryError, Replication,
    Result, StoreError,
};

use super::connection::{bounded, StoreConnection};

/// Ensures the keyspace and product table exist.
///
/// Any failure, including a closed connection, is a `SchemaFailed` error.
pub async fn ensure_schema(connection: &StoreConnection, replication: &Replication) -> Result<()> {
    let session = connection.session().map_err(|error| {
        tracing::error!(error = %error, "Cannot provision schema without a ready connection");
        RepositoryError::SchemaFailed(StoreError::Closed)
    })?;

    let keyspace = connection.keyspace();
    let statements = [
        create_keyspace_statement(keyspace, replication),
        create_products_table_statement(keyspace),
    ];

    for statement in &statements {
        bounded(
            connection.request_timeout(),
            session.execute(statement, Vec::new()),
        )
        .await
        .map_err(|source| {
            tracing::error!(
                keyspace = %keyspace,
                statement = %statement,
                error = %source,
                "Schema provisioning failed"
            );
            RepositoryError::SchemaFailed(source)
        })?;
    }

    tracing::info!(
        keyspace = %keyspace,
        replication = %replication.to_cql(),
        "Schema ready"
    );
    Ok(())
}
