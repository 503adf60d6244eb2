//! # Domain Types
//!
//! Core types used throughout the warehouse API.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Record      │   │    RecordId     │   │    Envelope     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  column → value │   │  u64 primary    │   │  success        │       │
//! │  │  shape owned by │   │  key, parsed    │   │  data?          │       │
//! │  │  the schema     │   │  from the path  │   │  error?         │       │
//! │  └─────────────────┘   └─────────────────┘   │  affectedRows?  │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────┐                                                    │
//! │  │   NewProduct    │  Insert values after default filling              │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records are deliberately untyped: the relational schema is external and the
//! API returns whatever columns the table has.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::DEFAULT_PRODUCT_STATUS;

// =============================================================================
// Record
// =============================================================================

/// One row of a resource, keyed by column name.
pub type Record = Map<String, Value>;

// =============================================================================
// Record Id
// =============================================================================

/// Integer primary key of a record within one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// Wraps a raw key.
    #[inline]
    pub const fn new(id: u64) -> Self {
        RecordId(id)
    }

    /// Returns the raw key.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<RecordId> for Value {
    fn from(id: RecordId) -> Self {
        Value::from(id.0)
    }
}

// =============================================================================
// Envelope
// =============================================================================

/// Uniform response body for every operation.
///
/// ## Shapes
/// ```json
/// { "success": true,  "data": { ... } }
/// { "success": true,  "data": { ... }, "affectedRows": 1 }
/// { "success": true,  "affectedRows": 0 }
/// { "success": false, "error": "Invalid id" }
/// ```
///
/// Fields are private so a failure can never carry data and a success can
/// never carry an error. For the same reason an envelope is only ever
/// serialized, never parsed back:
///
/// ```compile_fail
/// let _: warehouse_core::Envelope =
///     serde_json::from_str(r#"{"success":false,"data":1}"#).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T = Value> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    affected_rows: Option<u64>,
}

impl<T> Envelope<T> {
    /// Successful result carrying data.
    pub fn ok(data: T) -> Self {
        Envelope {
            success: true,
            data: Some(data),
            error: None,
            affected_rows: None,
        }
    }

    /// Successful mutation carrying the re-fetched data and the raw row count.
    pub fn ok_with_affected(data: T, affected_rows: u64) -> Self {
        Envelope {
            success: true,
            data: Some(data),
            error: None,
            affected_rows: Some(affected_rows),
        }
    }

    /// Successful mutation that only reports a row count.
    pub fn affected(affected_rows: u64) -> Self {
        Envelope {
            success: true,
            data: None,
            error: None,
            affected_rows: Some(affected_rows),
        }
    }

    /// Failed request.
    pub fn failure(error: impl Into<String>) -> Self {
        Envelope {
            success: false,
            data: None,
            error: Some(error.into()),
            affected_rows: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn affected_rows(&self) -> Option<u64> {
        self.affected_rows
    }
}

// =============================================================================
// New Product
// =============================================================================

/// Columns written by a product insert, in statement order.
pub const PRODUCT_INSERT_COLUMNS: [&str; 10] = [
    "sku",
    "product_name",
    "category_id",
    "description",
    "unit",
    "purchase_price",
    "selling_price",
    "reorder_level",
    "current_stock",
    "status",
];

/// Insert values for a product, after default filling.
///
/// ## Defaulting Policy
/// ```text
/// sku, product_name             → passed through (absent = NULL)
/// category_id, description, unit → blank = NULL
/// purchase_price, selling_price,
/// reorder_level, current_stock  → blank = 0
/// status                         → blank = "active"
/// ```
///
/// "Blank" is absent, `null`, `false`, `0` or `""`. A `0` for a numeric
/// column therefore stays `0`, and a `0` category becomes `NULL`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub sku: Value,
    pub product_name: Value,
    pub category_id: Value,
    pub description: Value,
    pub unit: Value,
    pub purchase_price: Value,
    pub selling_price: Value,
    pub reorder_level: Value,
    pub current_stock: Value,
    pub status: Value,
}

impl NewProduct {
    /// Builds insert values from a request body.
    ///
    /// Keys outside [`PRODUCT_INSERT_COLUMNS`] are ignored.
    pub fn from_record(body: &Record) -> Self {
        let passthrough = |key: &str| body.get(key).cloned().unwrap_or(Value::Null);
        let or_null = |key: &str| non_blank(body.get(key)).unwrap_or(Value::Null);
        let or_zero = |key: &str| non_blank(body.get(key)).unwrap_or_else(|| Value::from(0));

        NewProduct {
            sku: passthrough("sku"),
            product_name: passthrough("product_name"),
            category_id: or_null("category_id"),
            description: or_null("description"),
            unit: or_null("unit"),
            purchase_price: or_zero("purchase_price"),
            selling_price: or_zero("selling_price"),
            reorder_level: or_zero("reorder_level"),
            current_stock: or_zero("current_stock"),
            status: non_blank(body.get("status"))
                .unwrap_or_else(|| Value::from(DEFAULT_PRODUCT_STATUS)),
        }
    }

    /// Values in [`PRODUCT_INSERT_COLUMNS`] order, ready for binding.
    pub fn values(&self) -> [&Value; 10] {
        [
            &self.sku,
            &self.product_name,
            &self.category_id,
            &self.description,
            &self.unit,
            &self.purchase_price,
            &self.selling_price,
            &self.reorder_level,
            &self.current_stock,
            &self.status,
        ]
    }

    /// Column/value pairs in insert order.
    pub fn columns(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        PRODUCT_INSERT_COLUMNS.into_iter().zip(self.values())
    }
}

/// Returns the value unless it is blank.
fn non_blank(value: Option<&Value>) -> Option<Value> {
    let value = value?;
    let blank = match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    };
    (!blank).then(|| value.clone())
}

// =============================================================================
// Unit Tests
// =============================================================================
