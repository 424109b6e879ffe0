//! Declared column/category registry.

use crate::coerce::category::TypeCategory;

/// Immutable mapping from type category to the column names declared under
/// it. Built once at startup and passed explicitly to the pipeline.
///
/// An empty set for a category is valid and means "nothing to coerce". A
/// name declared under two categories is not rejected; the category applied
/// later in the pipeline order wins.
#[derive(Debug, Clone, Default)]
pub struct TypedColumnRegistry {
    string: Vec<String>,
    float: Vec<String>,
    integer: Vec<String>,
    timestamp_yf: Vec<String>,
    timestamp_df: Vec<String>,
    boolean: Vec<String>,
}

impl TypedColumnRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from per-category declaration slices.
    #[must_use]
    pub fn from_declarations(
        string: &[&str],
        float: &[&str],
        integer: &[&str],
        timestamp_yf: &[&str],
        timestamp_df: &[&str],
        boolean: &[&str],
    ) -> Self {
        let owned = |names: &[&str]| names.iter().map(|n| n.to_string()).collect();
        Self {
            string: owned(string),
            float: owned(float),
            integer: owned(integer),
            timestamp_yf: owned(timestamp_yf),
            timestamp_df: owned(timestamp_df),
            boolean: owned(boolean),
        }
    }

    /// Declare one column under a category. Declaration order is preserved.
    pub fn declare(&mut self, category: TypeCategory, column: impl Into<String>) {
        self.columns_vec(category).push(column.into());
    }

    /// Column names declared under `category`, in declaration order.
    #[must_use]
    pub fn columns_for(&self, category: TypeCategory) -> &[String] {
        match category {
            TypeCategory::String => &self.string,
            TypeCategory::Float => &self.float,
            TypeCategory::IntegerExact => &self.integer,
            TypeCategory::TimestampYearFirst => &self.timestamp_yf,
            TypeCategory::TimestampDayFirst => &self.timestamp_df,
            TypeCategory::Boolean => &self.boolean,
        }
    }

    /// The category a column is declared under, if any. When a name appears
    /// under several categories, the one applied last in pipeline order is
    /// returned, matching the coercion outcome.
    #[must_use]
    pub fn category_of(&self, column: &str) -> Option<TypeCategory> {
        TypeCategory::PIPELINE_ORDER
            .iter()
            .rev()
            .find(|cat| self.columns_for(**cat).iter().any(|c| c == column))
            .copied()
    }

    /// Total number of declared columns across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        TypeCategory::PIPELINE_ORDER
            .iter()
            .map(|cat| self.columns_for(*cat).len())
            .sum()
    }

    /// True when no columns are declared at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn columns_vec(&mut self, category: TypeCategory) -> &mut Vec<String> {
        match category {
            TypeCategory::String => &mut self.string,
            TypeCategory::Float => &mut self.float,
            TypeCategory::IntegerExact => &mut self.integer,
            TypeCategory::TimestampYearFirst => &mut self.timestamp_yf,
            TypeCategory::TimestampDayFirst => &mut self.timestamp_df,
            TypeCategory::Boolean => &mut self.boolean,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry() {
        let reg = TypedColumnRegistry::new();
        assert!(reg.is_empty());
        assert!(reg.columns_for(TypeCategory::String).is_empty());
        assert_eq!(reg.category_of("ANY"), None);
    }

    #[test]
    fn test_declare_preserves_order() {
        let mut reg = TypedColumnRegistry::new();
        reg.declare(TypeCategory::Float, "B");
        reg.declare(TypeCategory::Float, "A");
        assert_eq!(reg.columns_for(TypeCategory::Float), &["B", "A"]);
    }

    #[test]
    fn test_from_declarations() {
        let reg = TypedColumnRegistry::from_declarations(
            &["NAME"],
            &["AMOUNT"],
            &[],
            &[],
            &[],
            &["ACTIVE"],
        );
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.category_of("NAME"), Some(TypeCategory::String));
        assert_eq!(reg.category_of("AMOUNT"), Some(TypeCategory::Float));
        assert_eq!(reg.category_of("ACTIVE"), Some(TypeCategory::Boolean));
    }

    #[test]
    fn test_duplicate_declaration_last_category_wins() {
        let mut reg = TypedColumnRegistry::new();
        reg.declare(TypeCategory::String, "X");
        reg.declare(TypeCategory::IntegerExact, "X");
        // Integer runs after String in pipeline order, so it wins.
        assert_eq!(reg.category_of("X"), Some(TypeCategory::IntegerExact));
    }
}
