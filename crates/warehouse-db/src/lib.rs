//! # warehouse-db: Database Layer for the Warehouse API
//!
//! This crate provides MySQL access for the warehouse API using sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Warehouse Data Flow                              │
//! │                                                                         │
//! │  HTTP handler (GET /api/products/7)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  warehouse-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │    value     │  │   │
//! │  │   │   (pool.rs)   │    │               │    │              │  │   │
//! │  │   │               │    │ ProductRepo   │    │ JSON → bind  │  │   │
//! │  │   │ MySqlPool     │◄───│ TableRepo     │───►│ row → JSON   │  │   │
//! │  │   │ SELECT 1 probe│    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   ResourceStore (store.rs) ← trait the HTTP layer depends on   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     MySQL (warehouse_db)                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation, configuration and liveness probe
//! - [`error`] - Database error types
//! - [`repository`] - Product and auxiliary-table queries
//! - [`store`] - The `ResourceStore` trait and its MySQL implementation
//! - [`value`] - JSON parameter binding and row decoding
//!
//! ## Usage
//!
//! ```rust,ignore
//! use warehouse_db::{Database, DbConfig};
//!
//! let db = Database::connect(DbConfig::default()).await?;
//! let products = db.products().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod pool;
pub mod repository;
pub mod store;
pub mod value;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::ResourceStore;

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::table::TableRepository;
