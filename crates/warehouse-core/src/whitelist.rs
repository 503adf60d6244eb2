//! # Whitelisted Partial Updates
//!
//! Turns an arbitrary request body into a minimal `UPDATE ... SET` whose column
//! names come only from a fixed list.
//!
//! ## How a Body Becomes a Statement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Body: { "status": "inactive", "owner": "x", "sku": "BOLT-M8" }         │
//! │                                                                         │
//! │  Walk the WHITELIST in declared order:                                 │
//! │    sku            present  → "sku = ?"      value "BOLT-M8"            │
//! │    product_name   absent                                               │
//! │    ...                                                                  │
//! │    status         present  → "status = ?"   value "inactive"           │
//! │  "owner" is not whitelisted and never looked at.                       │
//! │                                                                         │
//! │  UPDATE products SET sku = ?, status = ? WHERE product_id = ?          │
//! │  binds:              "BOLT-M8", "inactive",               <id>         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Column names in the SQL text are the whitelist's `&'static str`s, never the
//! caller's keys, so a body cannot smuggle a column name into the statement.
//! Values are only ever bound as parameters.

use serde_json::Value;

use crate::error::ValidationError;
use crate::types::{Record, RecordId};
use crate::validation::ValidationResult;

/// Attributes of `products` a caller may change, in statement order.
pub const PRODUCT_UPDATE_FIELDS: AttributeWhitelist = AttributeWhitelist::new(&[
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
]);

// =============================================================================
// Attribute Whitelist
// =============================================================================

/// Ordered set of attribute names permitted in a partial update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeWhitelist {
    attributes: &'static [&'static str],
}

impl AttributeWhitelist {
    /// Declares a whitelist. Order is the order of the generated `SET` clause.
    pub const fn new(attributes: &'static [&'static str]) -> Self {
        AttributeWhitelist { attributes }
    }

    /// Declared attributes, in order.
    pub fn attributes(&self) -> &'static [&'static str] {
        self.attributes
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.attributes.contains(&attribute)
    }

    /// Builds the update for a candidate body.
    ///
    /// ## Returns
    /// * `Ok(PartialUpdate)` - at least one whitelisted key was present
    /// * `Err(ValidationError::NoUpdatableFields)` - nothing to set
    ///
    /// A key whose value is `null` counts as present and sets the column to NULL.
    pub fn build_update(&self, candidate: &Record) -> ValidationResult<PartialUpdate> {
        let assignments: Vec<(&'static str, Value)> = self
            .attributes
            .iter()
            .filter_map(|&attribute| {
                candidate
                    .get(attribute)
                    .map(|value| (attribute, value.clone()))
            })
            .collect();

        if assignments.is_empty() {
            return Err(ValidationError::NoUpdatableFields);
        }

        Ok(PartialUpdate { assignments })
    }
}

// =============================================================================
// Partial Update
// =============================================================================

/// A non-empty list of `column = value` assignments.
///
/// Only [`AttributeWhitelist::build_update`] constructs this, so every column
/// name is a whitelisted literal.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate {
    assignments: Vec<(&'static str, Value)>,
}

impl PartialUpdate {
    /// `column = ?` fragments, in whitelist order.
    pub fn fragments(&self) -> Vec<String> {
        self.assignments
            .iter()
            .map(|(column, _)| format!("{} = ?", column))
            .collect()
    }

    /// Fragments joined for a `SET` clause.
    pub fn set_clause(&self) -> String {
        self.fragments().join(", ")
    }

    /// Values parallel to [`fragments`](Self::fragments).
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.assignments.iter().map(|(_, value)| value)
    }

    /// Column/value pairs, in whitelist order.
    pub fn assignments(&self) -> &[(&'static str, Value)] {
        &self.assignments
    }

    /// Bind sequence for `SET ... WHERE <key> = ?`: field values, then the id.
    pub fn bind_values(&self, id: RecordId) -> Vec<Value> {
        self.values()
            .cloned()
            .chain(std::iter::once(Value::from(id)))
            .collect()
    }

    /// Full statement text for `table`, targeting `key_column`.
    ///
    /// Both names must be trusted literals; they are interpolated.
    pub fn to_sql(&self, table: &str, key_column: &str) -> String {
        format!(
            "UPDATE {} SET {} WHERE {} = ?",
            table,
            self.set_clause(),
            key_column
        )
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
