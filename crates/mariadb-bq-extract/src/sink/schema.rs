//! Destination schema derivation and row encoding.

use serde_json::{Map, Value};

use google_cloud_bigquery::http::table::{TableFieldSchema, TableFieldType, TableSchema};

use crate::coerce::{TypeCategory, TypedColumnRegistry};
use crate::core::{CellValue, ResultTable};

/// Derive the destination table schema from the declared categories.
///
/// Declared columns map directly from their category. Undeclared columns
/// fall back to the representation of their first non-null cell, and to
/// STRING when the column is all null.
pub fn derive_schema(table: &ResultTable, registry: &TypedColumnRegistry) -> TableSchema {
    let fields = table
        .columns()
        .iter()
        .map(|col| {
            let data_type = match registry.category_of(&col.name) {
                Some(category) => category_field_type(category),
                None => inferred_field_type(&col.cells),
            };
            TableFieldSchema {
                name: col.name.clone(),
                data_type,
                ..Default::default()
            }
        })
        .collect();

    TableSchema { fields }
}

fn category_field_type(category: TypeCategory) -> TableFieldType {
    match category {
        TypeCategory::String => TableFieldType::String,
        TypeCategory::Float => TableFieldType::Float,
        TypeCategory::IntegerExact => TableFieldType::Integer,
        TypeCategory::TimestampYearFirst | TypeCategory::TimestampDayFirst => {
            TableFieldType::Timestamp
        }
        TypeCategory::Boolean => TableFieldType::Boolean,
    }
}

fn inferred_field_type(cells: &[CellValue]) -> TableFieldType {
    let first = cells.iter().find(|c| !c.is_null());
    match first {
        Some(CellValue::Bool(_)) => TableFieldType::Boolean,
        Some(CellValue::Int(_)) => TableFieldType::Integer,
        Some(CellValue::Float(_)) => TableFieldType::Float,
        Some(CellValue::Decimal(_)) => TableFieldType::Numeric,
        Some(CellValue::Date(_)) => TableFieldType::Date,
        Some(CellValue::Time(_)) => TableFieldType::Time,
        Some(CellValue::Timestamp(_)) => TableFieldType::Timestamp,
        // Bytes upload as lossy text; see encode_cell.
        Some(CellValue::Text(_) | CellValue::Bytes(_)) | Some(CellValue::Null) | None => {
            TableFieldType::String
        }
    }
}

/// Encode one row as a JSON object keyed by column name.
pub fn encode_row(table: &ResultTable, row_idx: usize) -> Value {
    let mut object = Map::with_capacity(table.num_columns());
    for col in table.columns() {
        object.insert(col.name.clone(), encode_cell(&col.cells[row_idx]));
    }
    Value::Object(object)
}

/// Encode a cell as a BigQuery-compatible JSON value.
///
/// Non-finite floats (the coercion null marker included) load as NULL.
fn encode_cell(cell: &CellValue) -> Value {
    match cell {
        CellValue::Null => Value::Null,
        CellValue::Bool(v) => Value::Bool(*v),
        CellValue::Int(v) => Value::from(*v),
        CellValue::Float(v) => {
            if v.is_finite() {
                Value::from(*v)
            } else {
                Value::Null
            }
        }
        CellValue::Text(s) => Value::String(s.clone()),
        CellValue::Decimal(d) => Value::String(d.to_string()),
        CellValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
        CellValue::Time(t) => Value::String(t.format("%H:%M:%S").to_string()),
        CellValue::Timestamp(ts) => Value::String(ts.format("%Y-%m-%d %H:%M:%S%.6f").to_string()),
        CellValue::Bytes(b) => Value::String(String::from_utf8_lossy(b).into_owned()),
    }
}
