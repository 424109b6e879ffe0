//! Per-column type coercion.
//!
//! `coerce` rewrites one column of a [`ResultTable`] to its declared
//! category. It never fails past its own boundary: an absent column is
//! materialized with the category's fill value, a malformed cell is handled
//! by the category's policy, and anything else becomes a diagnostic line.
//!
//! Two distinct cell-failure policies are in play and must not be unified:
//! String and Integer leave an unconvertible cell in its original form,
//! while Float and both Timestamp categories replace it with the category's
//! null marker. Boolean is stricter still: one bad cell leaves the whole
//! column untouched.

use tracing::{debug, info, warn};

use crate::coerce::category::TypeCategory;
use crate::coerce::dates;
use crate::core::{CellValue, ResultTable};

/// Coerce `column` in `table` to `category`.
pub fn coerce(table: &mut ResultTable, column: &str, category: TypeCategory) {
    if table.is_empty() {
        info!("result table is empty, {category} column {column} not adjusted");
        return;
    }

    if table.column(column).is_none() {
        info!("column {column} absent from result, materializing as {category}");
        let fill = fill_value(category);
        let cells = vec![fill; table.num_rows()];
        table.push_column(column, cells);
    }

    let cells = table
        .column_mut(column)
        .expect("column exists after materialization");

    match category {
        TypeCategory::String => coerce_string(column, cells),
        TypeCategory::Float => coerce_float(column, cells),
        TypeCategory::IntegerExact => coerce_integer(column, cells),
        TypeCategory::TimestampYearFirst => {
            coerce_timestamp(column, cells, dates::parse_year_first)
        }
        TypeCategory::TimestampDayFirst => coerce_timestamp(column, cells, dates::parse_day_first),
        TypeCategory::Boolean => coerce_boolean(column, cells),
    }
}

/// Fill value for a column materialized because it was absent.
///
/// String columns fill with empty text. Float columns fill with the
/// not-a-number marker (a quirk of the original extractor kept on purpose:
/// an absent Float column loads as null markers, not zeros). The remaining
/// categories fill with NULL.
fn fill_value(category: TypeCategory) -> CellValue {
    match category {
        TypeCategory::String => CellValue::Text(String::new()),
        TypeCategory::Float => CellValue::Float(f64::NAN),
        TypeCategory::IntegerExact
        | TypeCategory::TimestampYearFirst
        | TypeCategory::TimestampDayFirst
        | TypeCategory::Boolean => CellValue::Null,
    }
}

/// Best-effort cast of every cell to text. Cells with no faithful text form
/// (non-UTF-8 bytes) keep their original value; NULLs stay NULL.
fn coerce_string(column: &str, cells: &mut [CellValue]) {
    let mut skipped = 0usize;
    for cell in cells.iter_mut() {
        let text = match cell {
            CellValue::Null | CellValue::Text(_) => continue,
            CellValue::Bool(v) => v.to_string(),
            CellValue::Int(v) => v.to_string(),
            CellValue::Float(v) => v.to_string(),
            CellValue::Decimal(v) => v.to_string(),
            CellValue::Date(v) => v.to_string(),
            CellValue::Time(v) => v.to_string(),
            CellValue::Timestamp(v) => v.format("%Y-%m-%d %H:%M:%S").to_string(),
            CellValue::Bytes(b) => match std::str::from_utf8(b) {
                Ok(s) => s.to_string(),
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            },
        };
        *cell = CellValue::Text(text);
    }
    if skipped > 0 {
        debug!("{column}: {skipped} cells had no text form and were left as-is");
    }
}

/// NULL and blank cells become zero, then every cell is cast to a 64-bit
/// integer. A cell that cannot be converted exactly keeps its original
/// value.
fn coerce_integer(column: &str, cells: &mut [CellValue]) {
    let mut unconverted = 0usize;
    for cell in cells.iter_mut() {
        let int = match cell {
            CellValue::Null => Some(0),
            CellValue::Int(_) => continue,
            CellValue::Bool(v) => Some(*v as i64),
            CellValue::Float(v) => exact_float_to_int(*v),
            CellValue::Decimal(d) => {
                if d.is_integer() {
                    rust_decimal::prelude::ToPrimitive::to_i64(d)
                } else {
                    None
                }
            }
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Some(0)
                } else {
                    trimmed.parse::<i64>().ok()
                }
            }
            CellValue::Date(_)
            | CellValue::Time(_)
            | CellValue::Timestamp(_)
            | CellValue::Bytes(_) => None,
        };
        match int {
            Some(v) => *cell = CellValue::Int(v),
            None => unconverted += 1,
        }
    }
    if unconverted > 0 {
        debug!("{column}: {unconverted} cells could not be cast to integer and were left as-is");
    }
}

/// A float converts to integer only when it is finite, whole, and in range.
fn exact_float_to_int(v: f64) -> Option<i64> {
    if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v <= i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

/// NULL cells become 0.0, then every cell is parsed as a double. Unlike the
/// String/Integer policy, a cell that fails to parse becomes the
/// not-a-number marker rather than keeping its original value.
fn coerce_float(column: &str, cells: &mut [CellValue]) {
    let mut coerced_to_null = 0usize;
    for cell in cells.iter_mut() {
        let float = match cell {
            CellValue::Null => Some(0.0),
            CellValue::Float(_) => continue,
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            CellValue::Decimal(d) => rust_decimal::prelude::ToPrimitive::to_f64(d),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            CellValue::Date(_)
            | CellValue::Time(_)
            | CellValue::Timestamp(_)
            | CellValue::Bytes(_) => None,
        };
        *cell = match float {
            Some(v) => CellValue::Float(v),
            None => {
                coerced_to_null += 1;
                CellValue::Float(f64::NAN)
            }
        };
    }
    if coerced_to_null > 0 {
        debug!("{column}: {coerced_to_null} cells did not parse as float and became null markers");
    }
}

/// Every cell is parsed as a calendar timestamp; failures become the null
/// timestamp marker, never the original text.
fn coerce_timestamp(
    column: &str,
    cells: &mut [CellValue],
    parse: fn(&str) -> Option<chrono::NaiveDateTime>,
) {
    let mut coerced_to_null = 0usize;
    for cell in cells.iter_mut() {
        let ts = match cell {
            CellValue::Null => continue,
            CellValue::Timestamp(_) => continue,
            CellValue::Date(d) => d.and_hms_opt(0, 0, 0),
            CellValue::Text(s) => parse(s),
            CellValue::Bool(_)
            | CellValue::Int(_)
            | CellValue::Float(_)
            | CellValue::Decimal(_)
            | CellValue::Time(_)
            | CellValue::Bytes(_) => None,
        };
        *cell = match ts {
            Some(v) => CellValue::Timestamp(v),
            None => {
                coerced_to_null += 1;
                CellValue::Null
            }
        };
    }
    if coerced_to_null > 0 {
        debug!("{column}: {coerced_to_null} cells did not parse as timestamp and became null");
    }
}

/// Whole-column boolean cast. If any cell is uncastable the column is left
/// entirely in its pre-cast state and a diagnostic names the column; there
/// is no per-cell fallback here.
fn coerce_boolean(column: &str, cells: &mut [CellValue]) {
    let mut converted = Vec::with_capacity(cells.len());
    for cell in cells.iter() {
        let b = match cell {
            CellValue::Null => Some(CellValue::Null),
            CellValue::Bool(v) => Some(CellValue::Bool(*v)),
            CellValue::Int(v) => Some(CellValue::Bool(*v != 0)),
            CellValue::Float(v) => Some(CellValue::Bool(*v != 0.0)),
            CellValue::Text(s) => parse_bool_text(s).map(CellValue::Bool),
            CellValue::Decimal(_)
            | CellValue::Date(_)
            | CellValue::Time(_)
            | CellValue::Timestamp(_)
            | CellValue::Bytes(_) => None,
        };
        match b {
            Some(v) => converted.push(v),
            None => {
                warn!(
                    "error casting column {column} to boolean: \
                     value {:?} has no boolean form; column left unconverted",
                    cell
                );
                return;
            }
        }
    }
    cells.clone_from_slice(&converted);
}

fn parse_bool_text(s: &str) -> Option<bool> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(false);
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn table_with(name: &str, cells: Vec<CellValue>) -> ResultTable {
        let mut t = ResultTable::new();
        t.push_column(name, cells);
        t
    }

    #[test]
    fn test_empty_table_is_untouched() {
        let mut table = ResultTable::new();
        coerce(&mut table, "ANY", TypeCategory::String);
        assert_eq!(table.num_columns(), 0);
        assert_eq!(table.num_rows(), 0);
    }

    #[test]
    fn test_absent_string_column_materializes_empty_text() {
        let mut table = table_with("A", vec![text("x"), text("y"), text("z")]);
        coerce(&mut table, "MISSING", TypeCategory::String);

        let col = table.column("MISSING").unwrap();
        assert_eq!(col.cells.len(), 3);
        assert!(col.cells.iter().all(|c| *c == text("")));
    }

    #[test]
    fn test_absent_float_column_materializes_nan_markers() {
        let mut table = table_with("A", vec![text("x")]);
        coerce(&mut table, "TOTAL", TypeCategory::Float);

        let col = table.column("TOTAL").unwrap();
        assert_eq!(col.cells.len(), 1);
        match &col.cells[0] {
            CellValue::Float(v) => assert!(v.is_nan()),
            other => panic!("expected NaN marker, got {other:?}"),
        }
    }

    #[test]
    fn test_absent_timestamp_column_materializes_null() {
        let mut table = table_with("A", vec![text("x"), text("y")]);
        coerce(&mut table, "SEEN_AT", TypeCategory::TimestampYearFirst);

        let col = table.column("SEEN_AT").unwrap();
        assert!(col.cells.iter().all(CellValue::is_null));
    }

    #[test]
    fn test_string_casts_all_representations() {
        let mut table = table_with(
            "S",
            vec![
                CellValue::Int(12),
                CellValue::Bool(true),
                text("already"),
                CellValue::Null,
            ],
        );
        coerce(&mut table, "S", TypeCategory::String);

        let cells = &table.column("S").unwrap().cells;
        assert_eq!(cells[0], text("12"));
        assert_eq!(cells[1], text("true"));
        assert_eq!(cells[2], text("already"));
        assert_eq!(cells[3], CellValue::Null);
    }

    #[test]
    fn test_string_leaves_non_utf8_bytes() {
        let blob = CellValue::Bytes(vec![0xff, 0xfe]);
        let mut table = table_with("S", vec![blob.clone()]);
        coerce(&mut table, "S", TypeCategory::String);
        assert_eq!(table.column("S").unwrap().cells[0], blob);
    }

    #[test]
    fn test_integer_zero_fills_null_and_blank() {
        let mut table = table_with("N", vec![CellValue::Null, text(""), text("  ")]);
        coerce(&mut table, "N", TypeCategory::IntegerExact);

        let cells = &table.column("N").unwrap().cells;
        assert!(cells.iter().all(|c| *c == CellValue::Int(0)));
    }

    #[test]
    fn test_integer_tolerant_leaves_unparseable() {
        let mut table = table_with(
            "N",
            vec![text("41"), text("not a number"), CellValue::Float(12.5)],
        );
        coerce(&mut table, "N", TypeCategory::IntegerExact);

        let cells = &table.column("N").unwrap().cells;
        assert_eq!(cells[0], CellValue::Int(41));
        assert_eq!(cells[1], text("not a number"));
        assert_eq!(cells[2], CellValue::Float(12.5));
    }

    #[test]
    fn test_integer_accepts_whole_floats() {
        let mut table = table_with("N", vec![CellValue::Float(7.0)]);
        coerce(&mut table, "N", TypeCategory::IntegerExact);
        assert_eq!(table.column("N").unwrap().cells[0], CellValue::Int(7));
    }

    #[test]
    fn test_float_coerces_failures_to_nan_not_text() {
        let mut table = table_with(
            "F",
            vec![text("12.5"), text("garbage"), CellValue::Null, CellValue::Int(3)],
        );
        coerce(&mut table, "F", TypeCategory::Float);

        let cells = &table.column("F").unwrap().cells;
        assert_eq!(cells[0], CellValue::Float(12.5));
        match &cells[1] {
            CellValue::Float(v) => assert!(v.is_nan()),
            other => panic!("expected NaN marker, got {other:?}"),
        }
        assert_eq!(cells[2], CellValue::Float(0.0));
        assert_eq!(cells[3], CellValue::Float(3.0));
        // Every output cell is a float: finite or the NaN marker.
        assert!(cells.iter().all(|c| matches!(c, CellValue::Float(_))));
    }

    #[test]
    fn test_timestamp_parses_and_nulls_failures() {
        let mut table = table_with(
            "T",
            vec![text("2024-12-01 10:00:00"), text("nonsense"), CellValue::Null],
        );
        coerce(&mut table, "T", TypeCategory::TimestampYearFirst);

        let cells = &table.column("T").unwrap().cells;
        let expected = NaiveDate::from_ymd_opt(2024, 12, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(cells[0], CellValue::Timestamp(expected));
        assert_eq!(cells[1], CellValue::Null);
        assert_eq!(cells[2], CellValue::Null);
    }

    #[test]
    fn test_timestamp_day_first_disambiguation() {
        let mut table = table_with("T", vec![text("01-02-2024")]);
        coerce(&mut table, "T", TypeCategory::TimestampDayFirst);

        let expected = NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            table.column("T").unwrap().cells[0],
            CellValue::Timestamp(expected)
        );
    }

    #[test]
    fn test_boolean_whole_column_left_on_bad_cell() {
        let before = vec![text("true"), text("N/A"), text("false")];
        let mut table = table_with("B", before.clone());
        coerce(&mut table, "B", TypeCategory::Boolean);

        // One uncastable cell leaves the entire column unconverted.
        assert_eq!(table.column("B").unwrap().cells, before);
    }

    #[test]
    fn test_boolean_casts_clean_column() {
        let mut table = table_with(
            "B",
            vec![text("true"), text("0"), CellValue::Int(2), CellValue::Null],
        );
        coerce(&mut table, "B", TypeCategory::Boolean);

        let cells = &table.column("B").unwrap().cells;
        assert_eq!(cells[0], CellValue::Bool(true));
        assert_eq!(cells[1], CellValue::Bool(false));
        assert_eq!(cells[2], CellValue::Bool(true));
        assert_eq!(cells[3], CellValue::Null);
    }

    #[test]
    fn test_idempotent_for_value_categories() {
        let cases = [
            (
                TypeCategory::String,
                vec![CellValue::Int(1), text("x"), CellValue::Null],
            ),
            (
                TypeCategory::Float,
                vec![text("1.5"), text("bad"), CellValue::Null],
            ),
            (
                TypeCategory::IntegerExact,
                vec![text("7"), text("bad"), CellValue::Null],
            ),
            (
                TypeCategory::TimestampYearFirst,
                vec![text("2024-01-02"), text("bad")],
            ),
            (
                TypeCategory::TimestampDayFirst,
                vec![text("02-01-2024"), text("bad")],
            ),
        ];

        for (category, cells) in cases {
            let mut table = table_with("C", cells);
            coerce(&mut table, "C", category);
            let once: Vec<Vec<u8>> = table
                .column("C")
                .unwrap()
                .cells
                .iter()
                .map(|c| {
                    let mut buf = Vec::new();
                    c.encode_for_hash(&mut buf);
                    buf
                })
                .collect();

            coerce(&mut table, "C", category);
            let twice: Vec<Vec<u8>> = table
                .column("C")
                .unwrap()
                .cells
                .iter()
                .map(|c| {
                    let mut buf = Vec::new();
                    c.encode_for_hash(&mut buf);
                    buf
                })
                .collect();

            assert_eq!(once, twice, "{category} coercion is not idempotent");
        }
    }
}
