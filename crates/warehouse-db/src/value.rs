//! # JSON ↔ MySQL Values
//!
//! Records travel as JSON objects, so parameters arrive as `serde_json::Value`
//! and rows leave as `serde_json::Map`.
//!
//! ## Parameter Binding
//! ```text
//! JSON value         bound as
//! ──────────         ────────
//! null               NULL
//! true / false       BOOLEAN
//! 12                 BIGINT
//! 18446744073709551615  BIGINT UNSIGNED
//! 9.5                DOUBLE
//! "BOLT-M8"          VARCHAR
//! [..] / {..}        JSON
//! ```
//!
//! ## Row Decoding
//! ```text
//! MySQL column            JSON
//! ────────────            ────
//! INT / BIGINT ...        number
//! ... UNSIGNED            number
//! DECIMAL(12,2) 0.00      0        (integral decimals become integers)
//! DECIMAL(12,2) 9.50      9.5
//! DATETIME / TIMESTAMP    "2024-03-01T08:30:00.000Z"
//! DATE                    "2024-03-01"
//! VARCHAR / TEXT / ENUM   string
//! JSON                    nested value
//! BLOB / BINARY           array of bytes
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use sqlx::mysql::{MySql, MySqlArguments, MySqlRow};
use sqlx::query::Query;
use sqlx::{Column, Decode, Row, Type, TypeInfo};

use crate::error::{DbError, DbResult};
use warehouse_core::Record;

/// A statement being built against MySQL.
pub type MySqlQuery<'q> = Query<'q, MySql, MySqlArguments>;

// =============================================================================
// Binding
// =============================================================================

/// Binds one JSON value as the next positional parameter.
pub fn bind_value<'q>(query: MySqlQuery<'q>, value: &Value) -> MySqlQuery<'q> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                query.bind(i)
            } else if let Some(u) = n.as_u64() {
                query.bind(u)
            } else {
                query.bind(n.as_f64())
            }
        }
        Value::String(s) => query.bind(s.clone()),
        Value::Array(_) | Value::Object(_) => query.bind(sqlx::types::Json(value.clone())),
    }
}

/// Binds every value in order.
pub fn bind_all<'q, 'v>(
    query: MySqlQuery<'q>,
    values: impl IntoIterator<Item = &'v Value>,
) -> MySqlQuery<'q> {
    values.into_iter().fold(query, bind_value)
}

// =============================================================================
// Decoding
// =============================================================================

/// Converts a row into a record keyed by column name.
///
/// Column order is preserved.
pub fn row_to_record(row: &MySqlRow) -> DbResult<Record> {
    let mut record = Record::new();

    for (idx, column) in row.columns().iter().enumerate() {
        let name = column.name();
        let value = column_value(row, idx, name, column.type_info().name())?;
        record.insert(name.to_string(), value);
    }

    Ok(record)
}

/// Converts every row, failing on the first undecodable column.
pub fn rows_to_records(rows: &[MySqlRow]) -> DbResult<Vec<Record>> {
    rows.iter().map(row_to_record).collect()
}

fn column_value(row: &MySqlRow, idx: usize, column: &str, type_name: &str) -> DbResult<Value> {
    let value = match type_name {
        "NULL" => Value::Null,
        "BOOLEAN" => decode::<bool>(row, idx, column)?.map(Value::Bool).into_json(),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
            decode::<i64>(row, idx, column)?.map(Value::from).into_json()
        }
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => decode::<u64>(row, idx, column)?.map(Value::from).into_json(),
        "YEAR" => decode::<u16>(row, idx, column)?.map(Value::from).into_json(),
        "FLOAT" => decode::<f32>(row, idx, column)?
            .map(|f| float_to_json(f64::from(f)))
            .into_json(),
        "DOUBLE" => decode::<f64>(row, idx, column)?.map(float_to_json).into_json(),
        "DECIMAL" => decode::<Decimal>(row, idx, column)?
            .map(decimal_to_json)
            .into_json(),
        "DATE" => decode::<NaiveDate>(row, idx, column)?
            .map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
            .into_json(),
        "TIME" => decode::<NaiveTime>(row, idx, column)?
            .map(|t| Value::String(t.format("%H:%M:%S").to_string()))
            .into_json(),
        "DATETIME" => decode::<NaiveDateTime>(row, idx, column)?
            .map(|dt| Value::String(render_datetime(dt)))
            .into_json(),
        "TIMESTAMP" => decode::<DateTime<Utc>>(row, idx, column)?
            .map(|ts| Value::String(render_timestamp(ts)))
            .into_json(),
        "JSON" => decode::<sqlx::types::Json<Value>>(row, idx, column)?
            .map(|json| json.0)
            .into_json(),
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
            decode::<Vec<u8>>(row, idx, column)?.map(bytes_to_json).into_json()
        }
        // CHAR, VARCHAR, TEXT, ENUM, SET and anything newer
        _ => match decode::<String>(row, idx, column) {
            Ok(text) => text.map(Value::String).into_json(),
            Err(_) => {
                tracing::warn!(column, type_name, "Unmapped column type, decoding as bytes");
                decode::<Vec<u8>>(row, idx, column)?.map(bytes_to_json).into_json()
            }
        },
    };

    Ok(value)
}

fn decode<'r, T>(row: &'r MySqlRow, idx: usize, column: &str) -> DbResult<Option<T>>
where
    T: Decode<'r, MySql> + Type<MySql>,
{
    row.try_get::<Option<T>, _>(idx).map_err(|e| DbError::Decode {
        column: column.to_string(),
        message: e.to_string(),
    })
}

/// `Option<Value>` → `Value`, with SQL NULL as JSON null.
trait IntoJson {
    fn into_json(self) -> Value;
}

impl IntoJson for Option<Value> {
    fn into_json(self) -> Value {
        self.unwrap_or(Value::Null)
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Integral decimals become JSON integers; others become floats.
///
/// Falls back to the decimal's text when it does not fit either.
pub fn decimal_to_json(d: Decimal) -> Value {
    if d.fract().is_zero() {
        if let Some(i) = d.to_i64() {
            return Value::from(i);
        }
    }

    d.to_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(d.to_string()))
}

/// NaN and infinities have no JSON form and become null.
pub fn float_to_json(f: f64) -> Value {
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}

/// DATETIME carries no zone; it is rendered as if UTC.
pub fn render_datetime(dt: NaiveDateTime) -> String {
    render_timestamp(dt.and_utc())
}

pub fn render_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn bytes_to_json(bytes: Vec<u8>) -> Value {
    Value::Array(bytes.into_iter().map(Value::from).collect())
}

// =============================================================================
// Unit Tests
// =============================================================================
