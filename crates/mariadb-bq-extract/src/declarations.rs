//! Declared column types for the extraction query.
//!
//! Each result column the query produces is declared here under the
//! semantic category it must load as; the coercion pipeline guarantees the
//! declared representation regardless of what the driver hands back. A
//! column left undeclared passes through untouched. Edit these lists
//! together with [`crate::query::QUERY`].

use crate::coerce::TypedColumnRegistry;

/// Free-text columns.
pub const STRING_COLUMNS: &[&str] = &["CUSTOMER_NAME", "ORDER_STATUS"];

/// Columns with decimal places, e.g. 12.4.
pub const FLOAT_COLUMNS: &[&str] = &["ORDER_TOTAL", "UNIT_PRICE"];

/// Whole-number columns, e.g. 10.
pub const INTEGER_COLUMNS: &[&str] = &["QUANTITY"];

/// Timestamps with the year first, e.g. 2024-12-01.
pub const TIMESTAMP_YEAR_FIRST_COLUMNS: &[&str] = &["CREATED_AT"];

/// Timestamps with the day first, e.g. 01-12-2024.
pub const TIMESTAMP_DAY_FIRST_COLUMNS: &[&str] = &["DELIVERY_DATE"];

/// True/false columns.
pub const BOOLEAN_COLUMNS: &[&str] = &["IS_PAID"];

/// Build the process-wide registry from the declarations above.
#[must_use]
pub fn registry() -> TypedColumnRegistry {
    TypedColumnRegistry::from_declarations(
        STRING_COLUMNS,
        FLOAT_COLUMNS,
        INTEGER_COLUMNS,
        TIMESTAMP_YEAR_FIRST_COLUMNS,
        TIMESTAMP_DAY_FIRST_COLUMNS,
        BOOLEAN_COLUMNS,
    )
}
