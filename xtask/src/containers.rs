//! Container management for the ScyllaDB node used by integration runs.
//!
//! Pure functions build command arguments; the async functions run them
//! through Docker or Podman.

use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;

pub type Result<T> = std::result::Result<T, ContainerError>;

#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("Container runtime not found: {0}")]
    RuntimeNotFound(String),

    #[error("Failed to start container: {0}")]
    StartFailed(String),

    #[error("Container '{name}' is not healthy after {timeout_secs}s")]
    NotHealthy { name: String, timeout_secs: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Container runtime (Docker or Podman).
#[derive(Debug, Clone, Copy, Default)]
pub enum ContainerRuntime {
    #[default]
    Docker,
    Podman,
}

/// Specification for a container.
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    pub name: &'static str,
    pub image: &'static str,
    pub port: u16,
    pub volume_name: &'static str,
    pub volume_path: &'static str,
    pub command: Option<&'static str>,
    /// Command run inside the container; exit status 0 means healthy.
    pub health_check: &'static [&'static str],
}

/// Single-node ScyllaDB in developer mode.
pub const SCYLLA_SPEC: ContainerSpec = ContainerSpec {
    name: "catalog-scylla",
    image: "scylladb/scylla:6.2",
    port: 9042,
    volume_name: "catalog-scylla-data",
    volume_path: "/var/lib/scylla",
    command: Some("--smp 1 --memory 750M --overprovisioned 1 --developer-mode 1"),
    health_check: &["cqlsh", "-e", "SELECT now() FROM system.local"],
};

/// Builds arguments for `docker run` / `podman run`.
pub fn container_run_args(spec: &ContainerSpec) -> Vec<String> {
    let mut args = vec![
        "run".to_string(),
        "--name".to_string(),
        spec.name.to_string(),
        "-d".to_string(),
        "-p".to_string(),
        format!("{}:{}", spec.port, spec.port),
        "-v".to_string(),
        format!("{}:{}", spec.volume_name, spec.volume_path),
        spec.image.to_string(),
    ];

    if let Some(cmd) = spec.command {
        args.extend(cmd.split_whitespace().map(String::from));
    }

    args
}

/// Builds arguments for the in-container health probe.
pub fn health_check_args(spec: &ContainerSpec) -> Vec<&'static str> {
    let mut args = vec!["exec", spec.name];
    args.extend_from_slice(spec.health_check);
    args
}

/// Returns the command name for the container runtime.
pub fn runtime_command(runtime: ContainerRuntime) -> &'static str {
    match runtime {
        ContainerRuntime::Docker => "docker",
        ContainerRuntime::Podman => "podman",
    }
}

/// Detects which container runtime is available, Docker first.
pub async fn detect_runtime() -> Result<ContainerRuntime> {
    for (runtime, cmd) in [
        (ContainerRuntime::Docker, "docker"),
        (ContainerRuntime::Podman, "podman"),
    ] {
        let output = Command::new(cmd).arg("--version").output().await;

        if let Ok(output) = output {
            if output.status.success() {
                return Ok(runtime);
            }
        }
    }

    Err(ContainerError::RuntimeNotFound(
        "Neither docker nor podman found in PATH".to_string(),
    ))
}

/// Returns true if a container with this name is already running.
pub async fn is_running(runtime: ContainerRuntime, name: &str) -> Result<bool> {
    let output = Command::new(runtime_command(runtime))
        .args(["ps", "-q", "-f", &format!("name={}", name)])
        .output()
        .await?;

    Ok(!String::from_utf8_lossy(&output.stdout).trim().is_empty())
}

/// Stops and removes a container.
///
/// Errors are ignored since the container might not exist.
pub async fn stop_container(runtime: ContainerRuntime, name: &str) -> Result<()> {
    let cmd = runtime_command(runtime);

    let _ = Command::new(cmd).args(["stop", name]).output().await;
    let _ = Command::new(cmd).args(["rm", name]).output().await;

    Ok(())
}

/// Starts a container, replacing any stopped one with the same name.
pub async fn start_container(runtime: ContainerRuntime, spec: &ContainerSpec) -> Result<()> {
    stop_container(runtime, spec.name).await?;

    let args = container_run_args(spec);
    let output = Command::new(runtime_command(runtime))
        .args(&args)
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ContainerError::StartFailed(format!(
            "'{}': {}",
            spec.name, stderr
        )));
    }

    Ok(())
}

/// Polls the health probe until it passes or the timeout is exceeded.
pub async fn wait_for_health(
    runtime: ContainerRuntime,
    spec: &ContainerSpec,
    timeout: Duration,
) -> Result<()> {
    let start = std::time::Instant::now();
    let poll_interval = Duration::from_secs(2);
    let args = health_check_args(spec);

    while start.elapsed() < timeout {
        let healthy = Command::new(runtime_command(runtime))
            .args(&args)
            .output()
            .await
            .map(|output| output.status.success())
            .unwrap_or(false);

        if healthy {
            return Ok(());
        }

        tokio::time::sleep(poll_interval).await;
    }

    Err(ContainerError::NotHealthy {
        name: spec.name.to_string(),
        timeout_secs: timeout.as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_run_args() {
        let args = container_run_args(&SCYLLA_SPEC);

        assert_eq!(args[0], "run");
        assert!(args.contains(&"catalog-scylla".to_string()));
        assert!(args.contains(&"9042:9042".to_string()));
        assert!(args.contains(&"catalog-scylla-data:/var/lib/scylla".to_string()));
        assert!(args.contains(&"scylladb/scylla:6.2".to_string()));
        // Command args should be split after the image
        let image = args.iter().position(|a| a == "scylladb/scylla:6.2").unwrap();
        assert_eq!(args[image + 1], "--smp");
        assert!(args.contains(&"--developer-mode".to_string()));
    }

    #[test]
    fn test_health_check_args() {
        assert_eq!(
            health_check_args(&SCYLLA_SPEC),
            vec![
                "exec",
                "catalog-scylla",
                "cqlsh",
                "-e",
                "SELECT now() FROM system.local"
            ]
        );
    }

    #[test]
    fn test_runtime_command() {
        assert_eq!(runtime_command(ContainerRuntime::Docker), "docker");
        assert_eq!(runtime_command(ContainerRuntime::Podman), "podman");
    }
}
