//! Semantic type categories for declared columns.

use std::fmt;

/// Target type category a declared column is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    /// Free text.
    String,

    /// 64-bit floating point; unparseable cells become NULL.
    Float,

    /// 64-bit signed integer; unparseable cells are left as-is.
    IntegerExact,

    /// Calendar timestamp, ambiguous numeric components resolved year-first.
    TimestampYearFirst,

    /// Calendar timestamp, ambiguous numeric components resolved day-first.
    TimestampDayFirst,

    /// Boolean; an uncastable cell leaves the whole column unconverted.
    Boolean,
}

impl TypeCategory {
    /// Fixed order the pipeline applies categories in.
    pub const PIPELINE_ORDER: [TypeCategory; 6] = [
        TypeCategory::String,
        TypeCategory::TimestampYearFirst,
        TypeCategory::TimestampDayFirst,
        TypeCategory::Float,
        TypeCategory::IntegerExact,
        TypeCategory::Boolean,
    ];
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TypeCategory::String => "String",
            TypeCategory::Float => "Float",
            TypeCategory::IntegerExact => "Integer",
            TypeCategory::TimestampYearFirst => "Timestamp (year first)",
            TypeCategory::TimestampDayFirst => "Timestamp (day first)",
            TypeCategory::Boolean => "Boolean",
        };
        f.write_str(label)
    }
}
