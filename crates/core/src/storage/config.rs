//! Validated store settings.
//!
//! Raw values come from the environment (see the binary's `Config`); this
//! module turns them into types that are safe to place into CQL text.

use std::fmt;
use std::time::Duration;

use super::ConfigError;

/// Longest keyspace name accepted by Cassandra.
const MAX_KEYSPACE_LEN: usize = 48;

/// A keyspace name that is a valid unquoted CQL identifier.
///
/// DDL statements cannot bind parameters, so the name is interpolated into
/// statement text and must be checked first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyspace(String);

impl Keyspace {
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if is_identifier(&name, MAX_KEYSPACE_LEN) {
            Ok(Self(name))
        } else {
            Err(ConfigError::InvalidKeyspace(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Keyspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replication settings for the keyspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replication {
    Simple { factor: u32 },
    NetworkTopology { datacenters: Vec<(String, u32)> },
}

impl Replication {
    /// Parses a strategy name plus its parameters.
    ///
    /// `SimpleStrategy` uses `factor`. `NetworkTopologyStrategy` uses
    /// `datacenters`, formatted as `dc1:3,dc2:2`.
    pub fn parse(strategy: &str, factor: u32, datacenters: &str) -> Result<Self, ConfigError> {
        match strategy {
            "SimpleStrategy" => {
                if factor == 0 {
                    return Err(ConfigError::InvalidReplication(
                        "replication factor must be at least 1".to_string(),
                    ));
                }
                Ok(Replication::Simple { factor })
            }
            "NetworkTopologyStrategy" => {
                let datacenters = parse_datacenters(datacenters)?;
                Ok(Replication::NetworkTopology { datacenters })
            }
            other => Err(ConfigError::InvalidReplication(format!(
                "unknown strategy {other:?}"
            ))),
        }
    }

    /// Renders the replication map used in `CREATE KEYSPACE`.
    pub fn to_cql(&self) -> String {
        match self {
            Replication::Simple { factor } => {
                format!("{{'class': 'SimpleStrategy', 'replication_factor': {factor}}}")
            }
            Replication::NetworkTopology { datacenters } => {
                let mut cql = String::from("{'class': 'NetworkTopologyStrategy'");
                for (name, factor) in datacenters {
                    cql.push_str(&format!(", '{name}': {factor}"));
                }
                cql.push('}');
                cql
            }
        }
    }
}

fn parse_datacenters(raw: &str) -> Result<Vec<(String, u32)>, ConfigError> {
    let mut datacenters = Vec::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (name, factor) = pair.split_once(':').ok_or_else(|| {
            ConfigError::InvalidReplication(format!("expected dc:factor, got {pair:?}"))
        })?;
        let name = name.trim();
        if !is_datacenter_name(name) {
            return Err(ConfigError::InvalidReplication(format!(
                "invalid datacenter name {name:?}"
            )));
        }
        let factor: u32 = factor.trim().parse().map_err(|_| {
            ConfigError::InvalidReplication(format!("invalid factor for datacenter {name:?}"))
        })?;
        if factor == 0 {
            return Err(ConfigError::InvalidReplication(format!(
                "replication factor for {name:?} must be at least 1"
            )));
        }
        datacenters.push((name.to_string(), factor));
    }

    if datacenters.is_empty() {
        return Err(ConfigError::InvalidReplication(
            "NetworkTopologyStrategy needs at least one datacenter".to_string(),
        ));
    }
    Ok(datacenters)
}

fn is_identifier(name: &str, max_len: usize) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    name.len() <= max_len
        && first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// Datacenter names end up inside a quoted string literal.
fn is_datacenter_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
}

/// Username and password for the cluster's password authenticator.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything needed to connect to the cluster and provision the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Contact points (`host:port`), tried in this order.
    pub contact_points: Vec<String>,
    pub credentials: Option<Credentials>,
    pub keyspace: Keyspace,
    pub replication: Replication,
    /// Bound on a single connection attempt.
    pub connect_timeout: Duration,
    /// Bound on every statement sent to the store.
    pub request_timeout: Duration,
    pub connect_attempts: u32,
    pub connect_retry_delay: Duration,
}

impl StoreConfig {
    /// Creates a config with default timeouts and a single-replica keyspace.
    pub fn new(contact_points: Vec<String>, keyspace: Keyspace) -> Result<Self, ConfigError> {
        if contact_points.is_empty() {
            return Err(ConfigError::NoContactPoints);
        }
        Ok(Self {
            contact_points,
            credentials: None,
            keyspace,
            replication: Replication::Simple { factor: 1 },
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(5),
            connect_attempts: 3,
            connect_retry_delay: Duration::from_secs(1),
        })
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_replication(mut self, replication: Replication) -> Self {
        self.replication = replication;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_connect_attempts(
        mut self,
        attempts: u32,
        retry_delay: Duration,
    ) -> Result<Self, ConfigError> {
        if attempts == 0 {
            return Err(ConfigError::NoConnectAttempts);
        }
        self.connect_attempts = attempts;
        self.connect_retry_delay = retry_delay;
        Ok(self)
    }
}
