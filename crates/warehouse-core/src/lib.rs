//! # warehouse-core: Pure Rules for the Warehouse API
//!
//! This crate holds everything about the warehouse data-access layer that can be
//! decided without touching the database: what a response looks like, which
//! identifiers are acceptable, which product attributes a caller may change, and
//! which auxiliary tables are exposed.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Warehouse Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 HTTP client (React frontend)                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ /api/<resource>                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    warehouse-api (axum)                         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ warehouse-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ whitelist │  │  tables   │  │ validation│  │   │
//! │  │   │ Envelope  │  │ Partial   │  │ Table     │  │ RecordId  │  │   │
//! │  │   │ NewProduct│  │ Update    │  │ Listing   │  │ parsing   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 warehouse-db (MySQL Layer)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Record, RecordId, Envelope, NewProduct
//! - [`whitelist`] - Whitelisted partial-update builder
//! - [`tables`] - Declared auxiliary tables and their capped listings
//! - [`validation`] - Identifier validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use serde_json::json;
//! use warehouse_core::whitelist::PRODUCT_UPDATE_FIELDS;
//!
//! let body = json!({ "selling_price": 12.5, "sku": "BOLT-M8", "owner": "x" });
//! let update = PRODUCT_UPDATE_FIELDS
//!     .build_update(body.as_object().unwrap())
//!     .unwrap();
//!
//! // Whitelist order, not request order; unknown keys are dropped.
//! assert_eq!(update.set_clause(), "sku = ?, selling_price = ?");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod tables;
pub mod types;
pub mod validation;
pub mod whitelist;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use tables::TableListing;
pub use types::*;
pub use whitelist::{AttributeWhitelist, PartialUpdate};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum rows returned by an auxiliary table listing.
///
/// Larger tables are silently truncated; the envelope carries no
/// partial-result flag.
pub const LISTING_ROW_CAP: u32 = 1000;

/// Status assigned to a product created without one.
pub const DEFAULT_PRODUCT_STATUS: &str = "active";
