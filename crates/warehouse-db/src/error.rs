//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  MySQL Error (sqlx::Error)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Categorized, message kept verbatim            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in warehouse-api) ← 500 + { success: false, error }         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Client sees the store's own message                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Store messages are passed through unsanitized, e.g.
//! `Duplicate entry 'BOLT-M8' for key 'sku'`.

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Database operation errors.
///
/// Every variant that originates in the store displays the store's message
/// unchanged.
#[derive(Debug, Error)]
pub enum DbError {
    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Inserting a duplicate SKU
    /// - Updating a SKU to one that already exists
    #[error("{message}")]
    UniqueViolation { message: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - `category_id` that has no row in `categories`
    /// - Deleting a product still referenced by receipt details
    #[error("{message}")]
    ForeignKeyViolation { message: String },

    /// NOT NULL constraint violation.
    ///
    /// ## When This Occurs
    /// - Creating a product without `sku` or `product_name`
    #[error("{message}")]
    NotNullViolation { message: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - MySQL is not running or not reachable on host:port
    /// - Wrong credentials or unknown database
    /// - Startup `SELECT 1` probe failed
    #[error("{0}")]
    ConnectionFailed(String),

    /// Query execution failed.
    ///
    /// ## When This Occurs
    /// - Runtime SQL error (unknown column, bad value for column type)
    /// - Auxiliary table missing from the schema
    #[error("{0}")]
    QueryFailed(String),

    /// A column could not be converted to JSON.
    #[error("Failed to decode column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Pool timed out waiting for a connection.
    ///
    /// Only possible when an acquire timeout was configured; the default
    /// configuration waits indefinitely.
    #[error("{0}")]
    PoolExhausted(String),

    /// Internal database error.
    #[error("{0}")]
    Internal(String),
}

impl DbError {
    /// Whether the failure came from the connection rather than the statement.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, DbError::ConnectionFailed(_) | DbError::PoolExhausted(_))
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → by ErrorKind (unique / FK / not-null / other)
/// sqlx::Error::Io, Tls        → DbError::ConnectionFailed
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();

                match db_err.kind() {
                    ErrorKind::UniqueViolation => DbError::UniqueViolation { message },
                    ErrorKind::ForeignKeyViolation => DbError::ForeignKeyViolation { message },
                    ErrorKind::NotNullViolation => DbError::NotNullViolation { message },
                    _ => DbError::QueryFailed(message),
                }
            }

            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolClosed => {
                DbError::ConnectionFailed(err.to_string())
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted(err.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_verbatim() {
        let err = DbError::UniqueViolation {
            message: "Duplicate entry 'BOLT-M8' for key 'sku'".to_string(),
        };
        assert_eq!(err.to_string(), "Duplicate entry 'BOLT-M8' for key 'sku'");

        let err = DbError::QueryFailed("Unknown column 'x' in 'field list'".to_string());
        assert_eq!(err.to_string(), "Unknown column 'x' in 'field list'");
    }

    #[test]
    fn test_pool_errors_map_to_connection_category() {
        let err: DbError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, DbError::PoolExhausted(_)));
        assert!(err.is_connection_error());

        let err: DbError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
    }

    #[test]
    fn test_row_not_found_is_internal() {
        // repositories use fetch_optional, so this only appears on misuse
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::Internal(_)));
        assert!(!err.is_connection_error());
    }
}
