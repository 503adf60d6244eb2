//! # Auxiliary Tables
//!
//! Tables exposed as read-only, capped listings (`GET /api/<table>`).
//!
//! ## Registration
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AUXILIARY_TABLES (compile-time list)                                   │
//! │       │                                                                 │
//! │       ▼  once, at startup                                               │
//! │  TableListing::new(name) ── validate identifier, render SQL            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  "SELECT * FROM `users` LIMIT 1000"   stored in the listing            │
//! │       │                                                                 │
//! │       ▼  per request                                                    │
//! │  same SQL string reused, no request input involved                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The table name is the one identifier interpolated into SQL text. That is
//! acceptable only because the set is closed and validated here.

use crate::validation::{validate_table_name, ValidationResult};
use crate::LISTING_ROW_CAP;

/// Tables with a generic listing endpoint.
pub const AUXILIARY_TABLES: [&str; 13] = [
    "users",
    "roles",
    "categories",
    "suppliers",
    "customers",
    "import_receipts",
    "import_receipt_details",
    "export_receipts",
    "export_receipt_details",
    "activity_logs",
    "stocktake",
    "stocktake_details",
    "notifications",
];

/// A validated table name with its pre-rendered listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableListing {
    name: &'static str,
    sql: String,
}

impl TableListing {
    /// Validates `name` and renders its capped `SELECT *`.
    pub fn new(name: &'static str) -> ValidationResult<Self> {
        validate_table_name(name)?;

        Ok(TableListing {
            name,
            sql: format!("SELECT * FROM `{}` LIMIT {}", name, LISTING_ROW_CAP),
        })
    }

    /// Listings for every entry of [`AUXILIARY_TABLES`].
    pub fn auxiliary() -> ValidationResult<Vec<TableListing>> {
        Self::declare(&AUXILIARY_TABLES)
    }

    /// Listings for an arbitrary declared list. Fails on the first bad name.
    pub fn declare(names: &[&'static str]) -> ValidationResult<Vec<TableListing>> {
        names.iter().map(|&name| TableListing::new(name)).collect()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The capped listing query.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Route path, `/api/<name>`.
    pub fn route(&self) -> String {
        format!("/api/{}", self.name)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
