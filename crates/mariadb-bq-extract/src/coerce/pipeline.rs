//! Category-ordered coercion pipeline.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{info, warn};

use crate::coerce::category::TypeCategory;
use crate::coerce::coercer;
use crate::coerce::registry::TypedColumnRegistry;
use crate::core::ResultTable;
use crate::error::Result;

/// Applies the column coercer for every declared column of every category,
/// in the fixed category order. Failures are isolated per category: a
/// category that blows up is logged and the remaining categories still run.
pub struct CoercionPipeline<'a> {
    registry: &'a TypedColumnRegistry,
}

impl<'a> CoercionPipeline<'a> {
    /// Create a pipeline over a registry.
    #[must_use]
    pub fn new(registry: &'a TypedColumnRegistry) -> Self {
        Self { registry }
    }

    /// Coerce every declared column of `table`.
    ///
    /// Each category gates on its own declared column set; an empty set is
    /// reported and skipped. Only a failure outside all per-category guards
    /// is returned to the caller, and the caller must treat it as fatal.
    pub fn run(&self, table: &mut ResultTable) -> Result<()> {
        for category in TypeCategory::PIPELINE_ORDER {
            let columns = self.registry.columns_for(category);
            if columns.is_empty() {
                info!("no {category} columns declared, nothing to adjust");
                continue;
            }

            info!("adjusting {} columns to {category}", columns.len());
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                for column in columns {
                    coercer::coerce(table, column, category);
                }
            }));
            if let Err(panic) = outcome {
                let message = panic_message(&panic);
                warn!("{category} adjustment failed and was skipped: {message}");
            }
        }
        Ok(())
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}
