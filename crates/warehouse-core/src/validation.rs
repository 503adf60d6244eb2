//! # Validation Module
//!
//! Structural checks on identifiers, run before any query is issued.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Route handler                                                │
//! │  └── THIS MODULE: record id shape, table identifier shape              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Whitelist (whitelist.rs)                                     │
//! │  └── Which attribute names may appear in an UPDATE                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (MySQL)                                             │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints (sku)                                          │
//! │  └── Foreign key constraints (category_id)                             │
//! │                                                                         │
//! │  Business semantics of a record are never checked here.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::RecordId;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Parses a path segment into a record identifier.
///
/// ## Rules
/// - ASCII digits only (no sign, no whitespace, no fraction)
/// - Must fit in `u64`
///
/// ## Example
/// ```rust
/// use warehouse_core::validation::parse_record_id;
///
/// assert_eq!(parse_record_id("42").unwrap().get(), 42);
/// assert!(parse_record_id("abc").is_err());
/// assert!(parse_record_id("-1").is_err());
/// ```
pub fn parse_record_id(raw: &str) -> ValidationResult<RecordId> {
    let invalid = || ValidationError::InvalidId {
        raw: raw.to_string(),
    };

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    raw.parse::<u64>().map(RecordId::new).map_err(|_| invalid())
}

/// Validates a declared table name.
///
/// ## Rules
/// - Must not be empty
/// - ASCII lowercase letters, digits and underscores only
/// - Must not start with a digit
///
/// The name is interpolated into SQL text, so anything outside this
/// alphabet is refused even though names come from a fixed list.
pub fn validate_table_name(name: &str) -> ValidationResult<()> {
    let well_formed = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if !well_formed {
        return Err(ValidationError::InvalidTableName {
            name: name.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_id() {
        assert_eq!(parse_record_id("0").unwrap().get(), 0);
        assert_eq!(parse_record_id("17").unwrap().get(), 17);
        assert_eq!(parse_record_id("007").unwrap().get(), 7);

        assert!(parse_record_id("").is_err());
        assert!(parse_record_id("abc").is_err());
        assert!(parse_record_id("12abc").is_err());
        assert!(parse_record_id("-3").is_err());
        assert!(parse_record_id("+3").is_err());
        assert!(parse_record_id("1.5").is_err());
        assert!(parse_record_id(" 4").is_err());
        // overflows u64
        assert!(parse_record_id("184467440737095516160").is_err());
    }

    #[test]
    fn test_invalid_id_keeps_raw_input() {
        let err = parse_record_id("abc").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidId {
                raw: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_validate_table_name() {
        assert!(validate_table_name("users").is_ok());
        assert!(validate_table_name("import_receipt_details").is_ok());
        assert!(validate_table_name("t2").is_ok());

        assert!(validate_table_name("").is_err());
        assert!(validate_table_name("2fa").is_err());
        assert!(validate_table_name("Users").is_err());
        assert!(validate_table_name("users; DROP TABLE users").is_err());
        assert!(validate_table_name("users`").is_err());
    }
}
