//! # mariadb-bq-extract
//!
//! MariaDB to BigQuery extract-and-load with declared column-type coercion.
//!
//! One run executes a fixed SQL query against a MariaDB source, coerces
//! each declared result column to its semantic type, removes duplicate
//! rows, and fully replaces the contents of a BigQuery destination table:
//!
//! - **Declared types** via a per-category column registry
//! - **Tolerant coercion** that logs and continues instead of aborting
//! - **Full-row dedup** before load, no primary-key concept
//! - **Full-replace load** into the destination table
//!
//! ## Example
//!
//! ```rust,no_run
//! use mariadb_bq_extract::{declarations, query, Config, ExtractLoadOrchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mariadb_bq_extract::ExtractError> {
//!     let config = Config::load("config.yaml")?;
//!     let orchestrator = ExtractLoadOrchestrator::new(config, declarations::registry());
//!     let result = orchestrator.run(query::QUERY).await?;
//!     println!("Loaded {} rows", result.rows_loaded);
//!     Ok(())
//! }
//! ```

pub mod coerce;
pub mod config;
pub mod core;
pub mod declarations;
pub mod error;
pub mod orchestrator;
pub mod query;
pub mod sink;
pub mod source;

// Re-exports for convenient access
pub use coerce::{CoercionPipeline, TypeCategory, TypedColumnRegistry};
pub use config::{Config, DestinationConfig, SourceConfig};
pub use core::{CellValue, ResultTable};
pub use error::{ExtractError, Result};
pub use orchestrator::{ExtractLoadOrchestrator, ExtractResult, HealthCheckResult};
pub use sink::BigQuerySink;
pub use source::MariaDbSource;
