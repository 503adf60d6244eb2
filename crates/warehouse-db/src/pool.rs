//! # Database Pool Management
//!
//! Connection pool creation, configuration and the startup liveness probe.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  Server Startup                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::default() ← host, port, user, password, database            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::connect(config).await ← SELECT 1 on one connection, then   │
//! │       │                               build the pool lazily             │
//! │       │                                                                 │
//! │       ├── probe fails ──► DbError::ConnectionFailed ──► process exits  │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            MySqlPool                     │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐       │                           │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...   │  (max_connections = 10)   │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘       │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       │ Concurrent access from request handlers                        │
//! │       ▼                                                                 │
//! │  Request 1 ──► Conn1 (one statement, then returned)                    │
//! │  Request 2 ──► Conn2                                                   │
//! │  Request 11 ─► waits in the pool queue until a connection is free      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Saturation
//! When every connection is busy, callers queue. The default configuration
//! sets no practical acquire timeout, so a waiter can wait as long as the
//! busiest query runs. Set [`DbConfig::acquire_timeout`] to bound it.
//!
//! The startup probe never goes through the pool. sqlx uses the acquire
//! timeout as its connect deadline and retries refused connections until it
//! passes, so the probe opens a single connection bounded by
//! [`DbConfig::connect_timeout`] instead.

use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlPool, MySqlPoolOptions};
use sqlx::Connection;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::product::ProductRepository;
use crate::repository::table::TableRepository;

/// Acquire wait used when no timeout is configured (about thirty years).
const UNBOUNDED_ACQUIRE_WAIT: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

/// Default bound on the startup probe.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::default()
///     .host("db.internal")
///     .database("warehouse_db")
///     .max_connections(20);
/// ```
#[derive(Clone)]
pub struct DbConfig {
    /// MySQL host.
    /// Default: 127.0.0.1
    pub host: String,

    /// MySQL port.
    /// Default: 3306
    pub port: u16,

    /// Login user.
    /// Default: root
    pub user: String,

    /// Login password.
    /// Default: empty
    pub password: String,

    /// Schema name.
    /// Default: warehouse_db
    pub database: String,

    /// Maximum number of connections in the pool.
    /// Default: 10
    pub max_connections: u32,

    /// How long a caller may wait for a free connection.
    /// Default: None (queue without limit)
    pub acquire_timeout: Option<Duration>,

    /// How long the startup probe may take to connect and answer.
    /// Default: 10 seconds
    pub connect_timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        DbConfig {
            host: "127.0.0.1".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            database: "warehouse_db".to_string(),
            max_connections: 10,
            acquire_timeout: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl DbConfig {
    /// Sets the host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the user.
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Sets the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Sets the schema name.
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Bounds how long a caller waits for a connection when the pool is saturated.
    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = Some(timeout);
        self
    }

    /// Bounds the startup probe.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// `host:port/database`, safe to log.
    pub fn connection_label(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.database)
    }

    fn connect_options(&self) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.database);

        if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        }
    }

    fn effective_acquire_timeout(&self) -> Duration {
        self.acquire_timeout.unwrap_or(UNBOUNDED_ACQUIRE_WAIT)
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cloning is cheap: the pool is reference counted, so every handler gets its
/// own handle onto the same connections.
#[derive(Debug, Clone)]
pub struct Database {
    /// The MySQL connection pool.
    pool: MySqlPool,
}

impl Database {
    /// Creates the connection pool and verifies the store answers.
    ///
    /// ## What This Does
    /// 1. Builds connect options from the config
    /// 2. Opens one connection and runs `SELECT 1`, within `connect_timeout`
    /// 3. Creates the pool lazily from the same options
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use database handle
    /// * `Err(DbError::ConnectionFailed)` - Store unreachable, refused, or
    ///   silent past `connect_timeout`
    ///
    /// The caller decides what a failure means; the server binary exits.
    pub async fn connect(config: DbConfig) -> DbResult<Self> {
        info!(
            store = %config.connection_label(),
            max_connections = config.max_connections,
            "Initializing database connection"
        );

        let options = config.connect_options();
        probe(&options, config.connect_timeout).await?;

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.effective_acquire_timeout())
            .connect_lazy_with(options);

        debug!("Database pool created");
        info!(database = %config.database, "Database connected");

        Ok(Database { pool })
    }

    /// Wraps an existing pool without probing it.
    pub fn from_pool(pool: MySqlPool) -> Self {
        Database { pool }
    }

    /// Returns a reference to the connection pool.
    ///
    /// Prefer repository methods when available.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Returns the auxiliary table repository.
    pub fn tables(&self) -> TableRepository {
        TableRepository::new(self.pool.clone())
    }

    /// Runs the liveness query.
    pub async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        self.ping().await.is_ok()
    }

    /// Closes the database connection pool.
    ///
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

/// Connects once outside the pool and runs `SELECT 1`.
async fn probe(options: &MySqlConnectOptions, timeout: Duration) -> DbResult<()> {
    let attempt = async {
        let mut conn = MySqlConnection::connect_with(options).await?;
        sqlx::query("SELECT 1").execute(&mut conn).await?;
        conn.close().await
    };

    match tokio::time::timeout(timeout, attempt).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(DbError::ConnectionFailed(e.to_string())),
        Err(_) => Err(DbError::ConnectionFailed(format!(
            "no answer from the database within {:?}",
            timeout
        ))),
    }
}
