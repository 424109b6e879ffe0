//! Extract-and-load orchestrator - main workflow coordinator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::coerce::{CoercionPipeline, TypedColumnRegistry};
use crate::config::Config;
use crate::core::ResultTable;
use crate::error::Result;
use crate::sink::BigQuerySink;
use crate::source::MariaDbSource;

/// Extract-and-load orchestrator.
pub struct ExtractLoadOrchestrator {
    config: Config,
    registry: TypedColumnRegistry,
}

/// Result of an extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResult {
    /// Unique run identifier.
    pub run_id: String,

    /// Final status.
    pub status: String,

    /// Total duration in seconds.
    pub duration_seconds: f64,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// When the run completed.
    pub completed_at: DateTime<Utc>,

    /// Rows returned by the extraction query.
    pub rows_extracted: usize,

    /// Duplicate rows removed before load.
    pub duplicates_removed: usize,

    /// Rows loaded into the destination table.
    pub rows_loaded: usize,

    /// True when the post-dedup table was empty and the load was skipped.
    pub load_skipped: bool,
}

/// Result of a health check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Source database reachable and answering queries.
    pub source_connected: bool,

    /// Source failure detail, if any.
    pub source_error: Option<String>,

    /// Source connect-and-ping latency in milliseconds.
    pub source_latency_ms: u64,

    /// Warehouse credentials file exists.
    pub credentials_file_found: bool,

    /// Overall verdict.
    pub healthy: bool,
}

impl ExtractLoadOrchestrator {
    /// Create a new orchestrator.
    #[must_use]
    pub fn new(config: Config, registry: TypedColumnRegistry) -> Self {
        Self { config, registry }
    }

    /// Run one extraction: fetch, coerce, dedup, load.
    ///
    /// Extraction, pipeline-level and load failures are fatal and propagate;
    /// per-column coercion problems only produce diagnostics. A run whose
    /// post-dedup table is empty skips the load and still succeeds.
    pub async fn run(&self, query: &str) -> Result<ExtractResult> {
        let started_at = Utc::now();
        let run_id = uuid::Uuid::new_v4().to_string();

        info!("Starting extraction run: {run_id}");

        // Phase 1: Extract. The connection is released on both exit paths
        // before the run proceeds or aborts.
        info!("Phase 1: Executing extraction query");
        let source = MariaDbSource::connect(&self.config.source).await?;
        let fetched = source.fetch(query).await;
        source.close().await;
        let mut table: ResultTable = fetched?;
        let rows_extracted = table.num_rows();

        // Phase 2: Coerce declared columns.
        info!("Phase 2: Adjusting column types");
        CoercionPipeline::new(&self.registry).run(&mut table)?;

        // Phase 3: Dedup by full-row equality.
        info!("Phase 3: Removing duplicate rows");
        let duplicates_removed = table.dedup_rows();
        if duplicates_removed > 0 {
            info!("Removed {duplicates_removed} duplicate rows");
        }

        // Phase 4: Load (skipped for an empty table).
        let load_skipped = table.is_empty();
        let rows_loaded = if load_skipped {
            info!(
                "Result table for {} is empty, skipping load",
                self.config.destination.table
            );
            0
        } else {
            info!("Phase 4: Loading {} rows into BigQuery", table.num_rows());
            let sink = BigQuerySink::connect(&self.config.destination.credentials).await?;
            sink.replace(&self.config.destination, &table, &self.registry)
                .await?;
            table.num_rows()
        };

        let completed_at = Utc::now();
        let duration = (completed_at - started_at).num_milliseconds() as f64 / 1000.0;

        let result = ExtractResult {
            run_id,
            status: "completed".to_string(),
            duration_seconds: duration,
            started_at,
            completed_at,
            rows_extracted,
            duplicates_removed,
            rows_loaded,
            load_skipped,
        };

        info!(
            "Extraction {}: {} rows extracted, {} duplicates removed, {} loaded in {:.1}s",
            result.status,
            result.rows_extracted,
            result.duplicates_removed,
            result.rows_loaded,
            result.duration_seconds
        );

        Ok(result)
    }

    /// Check source connectivity and the presence of the warehouse
    /// credentials file without touching the destination table.
    pub async fn health_check(&self) -> Result<HealthCheckResult> {
        let start = std::time::Instant::now();
        let (source_connected, source_error) = match MariaDbSource::connect(&self.config.source)
            .await
        {
            Ok(source) => {
                let ping = source.test_connection().await;
                source.close().await;
                match ping {
                    Ok(()) => (true, None),
                    Err(e) => (false, Some(e.to_string())),
                }
            }
            Err(e) => (false, Some(e.to_string())),
        };
        let source_latency_ms = start.elapsed().as_millis() as u64;

        let credentials_file_found = self.config.destination.credentials.exists();

        Ok(HealthCheckResult {
            source_connected,
            source_error,
            source_latency_ms,
            credentials_file_found,
            healthy: source_connected && credentials_file_found,
        })
    }
}

impl ExtractResult {
    /// Convert to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
