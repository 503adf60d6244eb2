//! # Error Types
//!
//! Domain-specific error types for warehouse-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  warehouse-core errors (this file)                                     │
//! │  ├── CoreError        - Request outcomes that are not store failures   │
//! │  └── ValidationError  - Input rejected before reaching the store       │
//! │                                                                         │
//! │  warehouse-db errors (separate crate)                                  │
//! │  └── DbError          - Store failures, message kept verbatim          │
//! │                                                                         │
//! │  warehouse-api errors (in app)                                         │
//! │  └── ApiError         - Status code + failure envelope                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → 400 / 404              │
//! │        DbError → ApiError → 500                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Request outcomes decided without a store failure.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No record matched the identifier.
    ///
    /// ## When This Occurs
    /// - GET on an id with no row
    /// - PUT whose read-back finds nothing (row deleted concurrently)
    /// - POST whose read-back finds nothing (row deleted between insert and fetch)
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Validation error (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a NotFound error for the given resource label.
    pub fn not_found(resource: impl Into<String>) -> Self {
        CoreError::NotFound {
            resource: resource.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These never reach the store; the API answers them with `400`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Path identifier is not a non-negative integer.
    #[error("Invalid id")]
    InvalidId { raw: String },

    /// Update body names no whitelisted attribute.
    #[error("No valid fields to update")]
    NoUpdatableFields,

    /// Request body is not a JSON object.
    #[error("Invalid request body: {reason}")]
    InvalidBody { reason: String },

    /// Declared table name is not a plain SQL identifier.
    #[error("Invalid table name '{name}'")]
    InvalidTableName { name: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
