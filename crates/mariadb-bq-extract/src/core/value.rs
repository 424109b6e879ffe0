//! Cell value types for database-agnostic row handling.
//!
//! A result set arrives from the driver with heterogeneous, per-cell
//! representations. `CellValue` is the tagged union those representations are
//! normalized into; the coercion pipeline then rewrites whole columns to one
//! canonical variant per declared category.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

/// A single table cell as produced by the driver or by coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// SQL NULL, or a coerced null marker (failed Float/Timestamp parse).
    Null,

    /// Boolean value.
    Bool(bool),

    /// 64-bit signed integer.
    Int(i64),

    /// 64-bit floating point.
    Float(f64),

    /// Text data.
    Text(String),

    /// Decimal value with arbitrary precision.
    Decimal(Decimal),

    /// Date without time component.
    Date(NaiveDate),

    /// Time without date component.
    Time(NaiveTime),

    /// Timestamp without timezone.
    Timestamp(NaiveDateTime),

    /// Binary data.
    Bytes(Vec<u8>),
}

impl CellValue {
    /// Check if this value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Variant name for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Bool(_) => "bool",
            CellValue::Int(_) => "int",
            CellValue::Float(_) => "float",
            CellValue::Text(_) => "text",
            CellValue::Decimal(_) => "decimal",
            CellValue::Date(_) => "date",
            CellValue::Time(_) => "time",
            CellValue::Timestamp(_) => "timestamp",
            CellValue::Bytes(_) => "bytes",
        }
    }

    /// Append a canonical byte encoding of this cell to `buf`.
    ///
    /// Used for full-row duplicate detection: two rows are duplicates exactly
    /// when their encodings match. NaN floats are normalized to a single bit
    /// pattern so rows holding null markers compare equal.
    pub fn encode_for_hash(&self, buf: &mut Vec<u8>) {
        match self {
            CellValue::Null => buf.push(0),
            CellValue::Bool(v) => {
                buf.push(1);
                buf.push(*v as u8);
            }
            CellValue::Int(v) => {
                buf.push(2);
                buf.extend_from_slice(&v.to_le_bytes());
            }
            CellValue::Float(v) => {
                buf.push(3);
                let bits = if v.is_nan() {
                    f64::NAN.to_bits()
                } else {
                    v.to_bits()
                };
                buf.extend_from_slice(&bits.to_le_bytes());
            }
            CellValue::Text(s) => {
                buf.push(4);
                buf.extend_from_slice(&(s.len() as u64).to_le_bytes());
                buf.extend_from_slice(s.as_bytes());
            }
            CellValue::Decimal(d) => {
                buf.push(5);
                buf.extend_from_slice(&d.serialize());
            }
            CellValue::Date(d) => {
                buf.push(6);
                buf.extend_from_slice(d.to_string().as_bytes());
            }
            CellValue::Time(t) => {
                buf.push(7);
                buf.extend_from_slice(t.to_string().as_bytes());
            }
            CellValue::Timestamp(ts) => {
                buf.push(8);
                buf.extend_from_slice(&ts.and_utc().timestamp_micros().to_le_bytes());
            }
            CellValue::Bytes(b) => {
                buf.push(9);
                buf.extend_from_slice(&(b.len() as u64).to_le_bytes());
                buf.extend_from_slice(b);
            }
        }
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(v: NaiveDateTime) -> Self {
        CellValue::Timestamp(v)
    }
}
