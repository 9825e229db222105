mod app;
mod config;
mod handlers;
mod service;
mod state;
mod storage;

use std::sync::Arc;

use anyhow::Result;
use catalog_core::storage::{ProductRepository, StoreConfig};
use clap::Parser;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    app::{create_app, request_timeout},
    config::Config,
    service::ProductService,
    state::AppState,
    storage::{ensure_schema, ConnectionManager, CqlProductRepository, StoreConnection},
};

/// Catalog - Product catalog service backed by Cassandra / ScyllaDB
#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store_config = Config::from_env().store_config()?;

    tracing::info!(
        contact_points = ?store_config.contact_points,
        keyspace = %store_config.keyspace,
        authenticated = store_config.credentials.is_some(),
        "Connecting to store"
    );

    let connection = Arc::new(
        ConnectionManager::new(storage::default_connector())
            .connect(&store_config)
            .await?,
    );
    let repository = Arc::new(CqlProductRepository::new(connection.clone()));

    let result = run(&cli, &store_config, connection, repository.clone()).await;

    // Release the connection on every exit path after a successful connect
    repository.close().await;

    result
}

/// Provision the schema, then serve until a shutdown signal arrives.
async fn run(
    cli: &Cli,
    store_config: &StoreConfig,
    connection: Arc<StoreConnection>,
    repository: Arc<CqlProductRepository>,
) -> Result<()> {
    ensure_schema(&connection, &store_config.replication).await?;

    let state = AppState::new(ProductService::new(repository), connection);

    // Build the application router
    let app = create_app(state, request_timeout(store_config.request_timeout));

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    // Run the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
