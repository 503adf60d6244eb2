//! API server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use warehouse_db::DbConfig;

/// Default HTTP listen port.
pub const DEFAULT_PORT: u16 = 3001;

/// Default allowed cross-origin caller (the frontend dev server).
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// MySQL connection settings
    pub db: DbConfig,

    /// HTTP listen port
    pub port: u16,

    /// Interface to bind (default: all interfaces)
    pub bind_addr: IpAddr,

    /// Single origin allowed by the CORS layer
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            db: DbConfig::default(),
            port: DEFAULT_PORT,
            bind_addr: IpAddr::from([0, 0, 0, 0]),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Unset keys take their defaults. A set key with an unparseable value
    /// is an error rather than a silent fallback.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();
        let mut db = defaults.db;

        if let Some(host) = lookup("DB_HOST") {
            db = db.host(host);
        }
        if let Some(port) = parse_var(&lookup, "DB_PORT")? {
            db = db.port(port);
        }
        if let Some(user) = lookup("DB_USER") {
            db = db.user(user);
        }
        if let Some(password) = lookup("DB_PASSWORD") {
            db = db.password(password);
        }
        if let Some(name) = lookup("DB_NAME") {
            db = db.database(name);
        }
        if let Some(limit) = parse_var::<u32, _>(&lookup, "DB_CONNECTION_LIMIT")? {
            if limit == 0 {
                return Err(ConfigError::InvalidValue("DB_CONNECTION_LIMIT".to_string()));
            }
            db = db.max_connections(limit);
        }

        Ok(ServerConfig {
            db,
            port: parse_var(&lookup, "PORT")?.unwrap_or(defaults.port),
            bind_addr: parse_var(&lookup, "BIND_ADDR")?.unwrap_or(defaults.bind_addr),
            cors_origin: lookup("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
        })
    }

    /// Socket address the HTTP listener binds.
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key.to_string()))
        })
        .transpose()
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
