//! Integration test infrastructure.
//!
//! Starts a ScyllaDB container, runs the catalog server against it and
//! drives the smoke scenario over HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Start ScyllaDB, run the server and the smoke scenario
//! cargo xtask integration
//!
//! # Skip container management (assumes a node is already on 127.0.0.1:9042)
//! cargo xtask integration --no-docker
//! ```

pub mod error;
pub mod smoke;

pub use error::{IntegrationError, Result};

use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::{Child, Command};

use crate::containers::{
    detect_runtime, is_running, start_container, stop_container, wait_for_health, SCYLLA_SPEC,
};
use crate::prelude::*;

/// Integration test command.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Run the smoke scenario against a real ScyllaDB node.

The command starts a ScyllaDB container, launches the catalog server with
`cargo run -p catalog`, checks health, creates a product, lists it back and
verifies that an invalid product is rejected. The server and the container
are stopped afterward.")]
pub struct IntegrationCommand {
    /// Skip Docker container management (assume ScyllaDB is already running).
    #[arg(long)]
    pub no_docker: bool,

    /// Keep the container running after the scenario completes.
    #[arg(long)]
    pub keep_containers: bool,

    /// Timeout in seconds for the container health check.
    #[arg(long, default_value = "120")]
    pub health_timeout: u64,

    /// Timeout in seconds for the server to build and report healthy.
    #[arg(long, default_value = "300")]
    pub server_timeout: u64,

    /// Port for the catalog server.
    #[arg(long, default_value = "3055")]
    pub port: u16,

    /// Keyspace the server provisions for the run.
    #[arg(long, default_value = "catalog_smoke")]
    pub keyspace: String,
}

/// Environment for the server process.
pub fn server_environment(port: u16, keyspace: &str) -> Vec<(&'static str, String)> {
    vec![
        ("PORT", port.to_string()),
        ("CASSANDRA_CONTACT_POINTS", format!("127.0.0.1:{}", SCYLLA_SPEC.port)),
        ("CASSANDRA_KEYSPACE", keyspace.to_string()),
        ("RUST_LOG", "catalog=info".to_string()),
    ]
}

/// Main entry point for integration command.
pub async fn run(command: IntegrationCommand, global: crate::Global) -> Result<()> {
    if !global.is_silent() {
        aprintln!("{}", p_b("Integration Tests"));
        aprintln!();
    }

    let runtime = if command.no_docker {
        if !global.is_silent() {
            aprintln!("{} Skipping container management (--no-docker)", p_y("⚠️"));
        }
        None
    } else {
        Some(detect_runtime().await?)
    };

    let mut started = false;
    if let Some(rt) = runtime {
        if is_running(rt, SCYLLA_SPEC.name).await? {
            if !global.is_silent() {
                aprintln!("{} ScyllaDB container already running", p_y("⚠️"));
            }
        } else {
            if !global.is_silent() {
                aprintln!("{} Starting ScyllaDB container...", p_b("🐳"));
            }
            start_container(rt, &SCYLLA_SPEC).await?;
            started = true;
        }

        if !global.is_silent() {
            aprintln!(
                "{} Waiting for CQL (max {}s)...",
                p_b("⏳"),
                command.health_timeout
            );
        }
        wait_for_health(
            rt,
            &SCYLLA_SPEC,
            Duration::from_secs(command.health_timeout),
        )
        .await?;
    }

    let outcome = run_against_server(&command, &global).await;

    if let Some(rt) = runtime {
        if started && !command.keep_containers {
            if !global.is_silent() {
                aprintln!("{} Stopping ScyllaDB container...", p_b("🐳"));
            }
            stop_container(rt, SCYLLA_SPEC.name).await?;
        }
    }

    aprintln!();
    match &outcome {
        Ok(()) => aprintln!("{} {}", p_g("✅"), p_g("Smoke scenario passed!")),
        Err(e) => aprintln!("{} {}", p_r("❌"), p_r(&e.to_string())),
    }
    outcome
}

async fn run_against_server(command: &IntegrationCommand, global: &crate::Global) -> Result<()> {
    if !global.is_silent() {
        aprintln!("{} Starting catalog server on port {}...", p_b("🔧"), command.port);
    }

    let mut server = spawn_server(command.port, &command.keyspace)?;
    let base_url = format!("http://127.0.0.1:{}", command.port);
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    let outcome = async {
        wait_for_server(&client, &base_url, command.server_timeout).await?;
        let sku = format!("SMOKE-{}", uuid::Uuid::new_v4().simple());
        smoke::run_scenario(&client, &base_url, &sku).await
    }
    .await;

    server.kill().await?;
    outcome
}

fn spawn_server(port: u16, keyspace: &str) -> Result<Child> {
    let mut cmd = Command::new("cargo");
    cmd.args(["run", "-p", "catalog"])
        .stdin(Stdio::null())
        .kill_on_drop(true);

    for (key, value) in server_environment(port, keyspace) {
        cmd.env(key, value);
    }

    Ok(cmd.spawn()?)
}

async fn wait_for_server(
    client: &reqwest::Client,
    base_url: &str,
    timeout_secs: u64,
) -> Result<()> {
    let start = Instant::now();
    let url = format!("{base_url}/health");

    while start.elapsed() < Duration::from_secs(timeout_secs) {
        if let Ok(response) = client.get(&url).send().await {
            if response.status().is_success() {
                return Ok(());
            }
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    Err(IntegrationError::ServerNotReady(timeout_secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_environment() {
        let vars = server_environment(3055, "catalog_smoke");

        assert!(vars.contains(&("PORT", "3055".to_string())));
        assert!(vars.contains(&("CASSANDRA_CONTACT_POINTS", "127.0.0.1:9042".to_string())));
        assert!(vars.contains(&("CASSANDRA_KEYSPACE", "catalog_smoke".to_string())));
    }
}
