use std::{env, fmt, str::FromStr, time::Duration};

use catalog_core::storage::{ConfigError, Credentials, Keyspace, Replication, StoreConfig};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cluster contact points, `host:port` (default: `127.0.0.1:9042`)
    pub contact_points: Vec<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Keyspace holding the products table (default: `store_manager`)
    pub keyspace: String,
    /// `SimpleStrategy` or `NetworkTopologyStrategy` (default: `SimpleStrategy`)
    pub replication_strategy: String,
    /// Replication factor for `SimpleStrategy` (default: 1)
    pub replication_factor: u32,
    /// Per-datacenter factors for `NetworkTopologyStrategy` (default: `dc1:3,dc2:2`)
    pub datacenters: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub connect_attempts: u32,
    pub connect_retry_delay_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CASSANDRA_CONTACT_POINTS` - Comma separated contact points (default: "127.0.0.1:9042")
    /// - `CASSANDRA_USERNAME` / `CASSANDRA_PASSWORD` - Optional credentials, both or neither
    /// - `CASSANDRA_KEYSPACE` - Keyspace name (default: "store_manager")
    /// - `CASSANDRA_REPLICATION_STRATEGY` - Replication class (default: "SimpleStrategy")
    /// - `CASSANDRA_REPLICATION_FACTOR` - SimpleStrategy factor (default: 1)
    /// - `CASSANDRA_DATACENTERS` - NetworkTopologyStrategy factors (default: "dc1:3,dc2:2")
    /// - `CASSANDRA_CONNECT_TIMEOUT_MS` - Per-attempt connect timeout (default: 5000)
    /// - `CASSANDRA_REQUEST_TIMEOUT_MS` - Per-statement timeout (default: 5000)
    /// - `CASSANDRA_CONNECT_ATTEMPTS` - Connection attempts before giving up (default: 3)
    /// - `CASSANDRA_CONNECT_RETRY_DELAY_MS` - Delay between attempts (default: 1000)
    pub fn from_env() -> Self {
        Self {
            contact_points: parse_contact_points(
                &env::var("CASSANDRA_CONTACT_POINTS")
                    .unwrap_or_else(|_| "127.0.0.1:9042".to_string()),
            ),
            username: env::var("CASSANDRA_USERNAME").ok().filter(|v| !v.is_empty()),
            password: env::var("CASSANDRA_PASSWORD").ok().filter(|v| !v.is_empty()),
            keyspace: env::var("CASSANDRA_KEYSPACE")
                .unwrap_or_else(|_| "store_manager".to_string()),
            replication_strategy: env::var("CASSANDRA_REPLICATION_STRATEGY")
                .unwrap_or_else(|_| "SimpleStrategy".to_string()),
            replication_factor: env_or("CASSANDRA_REPLICATION_FACTOR", 1),
            datacenters: env::var("CASSANDRA_DATACENTERS")
                .unwrap_or_else(|_| "dc1:3,dc2:2".to_string()),
            connect_timeout_ms: env_or("CASSANDRA_CONNECT_TIMEOUT_MS", 5_000),
            request_timeout_ms: env_or("CASSANDRA_REQUEST_TIMEOUT_MS", 5_000),
            connect_attempts: env_or("CASSANDRA_CONNECT_ATTEMPTS", 3),
            connect_retry_delay_ms: env_or("CASSANDRA_CONNECT_RETRY_DELAY_MS", 1_000),
        }
    }

    /// Validate into the typed store configuration.
    pub fn store_config(&self) -> Result<StoreConfig, ConfigError> {
        let keyspace = Keyspace::new(self.keyspace.as_str())?;
        let replication = Replication::parse(
            &self.replication_strategy,
            self.replication_factor,
            &self.datacenters,
        )?;

        let mut config = StoreConfig::new(self.contact_points.clone(), keyspace)?
            .with_replication(replication)
            .with_connect_timeout(Duration::from_millis(self.connect_timeout_ms))
            .with_request_timeout(Duration::from_millis(self.request_timeout_ms))
            .with_connect_attempts(
                self.connect_attempts,
                Duration::from_millis(self.connect_retry_delay_ms),
            )?;

        match (&self.username, &self.password) {
            (Some(username), Some(password)) => {
                config = config.with_credentials(Credentials {
                    username: username.clone(),
                    password: password.clone(),
                });
            }
            (None, None) => {}
            _ => return Err(ConfigError::IncompleteCredentials),
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Reads a numeric variable, warning and falling back to `default` when it
/// does not parse.
fn env_or<T>(name: &str, default: T) -> T
where
    T: FromStr + fmt::Display,
{
    parse_or(name, env::var(name).ok().as_deref(), default)
}

fn parse_or<T>(name: &str, raw: Option<&str>, default: T) -> T
where
    T: FromStr + fmt::Display,
{
    let Some(raw) = raw else {
        return default;
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(
                variable = name,
                value = raw,
                default = %default,
                "Ignoring unparseable environment variable, using default"
            );
            default
        }
    }
}

fn parse_contact_points(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|point| !point.is_empty())
        .map(str::to_string)
        .collect()
}
