//! Service configuration, read from the environment (and `.env`, loaded by
//! the binary before this runs).
//!
//! | Variable | Default | |
//! |---|---|---|
//! | `DATABASE_URL` | required | `postgres://…`, `postgresql://…` or `memory://` |
//! | `LISTEN_ADDR` | `0.0.0.0:5000` | HTTP bind address |
//! | `DATABASE_MAX_CONNECTIONS` | `5` | PostgreSQL pool size |

use std::net::{AddrParseError, SocketAddr};
use thiserror::Error;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid ({value:?}): {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Which store backs the service.
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseUrl {
    Postgres(String),
    Memory,
}

impl DatabaseUrl {
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(DatabaseUrl::Postgres(url.to_string()))
        } else if url.starts_with("memory://") {
            Ok(DatabaseUrl::Memory)
        } else {
            Err(ConfigError::Invalid {
                name: "DATABASE_URL",
                value: url.to_string(),
                reason: "expected postgres://, postgresql:// or memory://".to_string(),
            })
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: DatabaseUrl,
    pub listen_addr: SocketAddr,
    pub max_connections: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let listen_addr =
            lookup("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr: SocketAddr = listen_addr.parse().map_err(|e: AddrParseError| {
            ConfigError::Invalid {
                name: "LISTEN_ADDR",
                value: listen_addr.clone(),
                reason: e.to_string(),
            }
        })?;

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    name: "DATABASE_MAX_CONNECTIONS",
                    value: raw.clone(),
                    reason: "expected a positive integer".to_string(),
                })?,
        };

        Ok(Self {
            database_url: DatabaseUrl::parse(&database_url)?,
            listen_addr,
            max_connections,
        })
    }
}
