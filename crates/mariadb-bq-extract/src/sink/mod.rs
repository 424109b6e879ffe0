//! BigQuery destination: full-replace table load.
//!
//! Thin wrapper over the google-cloud-bigquery client. A load replaces the
//! destination table's contents entirely: the table is dropped if present,
//! recreated with a schema derived from the declared categories, and the
//! rows are streamed in bounded batches.

pub mod schema;

use std::path::Path;

use google_cloud_auth::credentials::CredentialsFile;
use google_cloud_bigquery::client::{Client, ClientConfig};
use google_cloud_bigquery::http::table::{Table, TableReference};
use google_cloud_bigquery::http::tabledata::insert_all::{InsertAllRequest, Row};
use serde_json::Value;
use tracing::{debug, info};

use crate::coerce::TypedColumnRegistry;
use crate::config::DestinationConfig;
use crate::core::ResultTable;
use crate::error::{ExtractError, Result};

/// OAuth scopes the service account must carry.
pub const OAUTH_SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/cloud-platform",
    "https://www.googleapis.com/auth/drive",
];

/// Rows per streaming insert request.
const INSERT_BATCH_ROWS: usize = 500;

/// BigQuery warehouse-load collaborator.
pub struct BigQuerySink {
    client: Client,
}

impl BigQuerySink {
    /// Authenticate from a service-account credentials file.
    pub async fn connect(credentials: &Path) -> Result<Self> {
        let path = credentials.to_string_lossy().into_owned();
        let credentials = CredentialsFile::new_from_file(path)
            .await
            .map_err(|e| ExtractError::Auth(format!("reading credentials file: {e}")))?;

        let (config, _project) = ClientConfig::new_with_credentials(credentials)
            .await
            .map_err(|e| ExtractError::Auth(format!("authenticating BigQuery client: {e}")))?;

        let client = Client::new(config)
            .await
            .map_err(|e| ExtractError::Auth(format!("creating BigQuery client: {e}")))?;

        info!("Authenticated BigQuery client");
        Ok(Self { client })
    }

    /// Fully replace the destination table's contents with `table`.
    pub async fn replace(
        &self,
        destination: &DestinationConfig,
        table: &ResultTable,
        registry: &TypedColumnRegistry,
    ) -> Result<()> {
        let (project, dataset, table_id) = destination.table_parts().ok_or_else(|| {
            ExtractError::Config(format!(
                "destination.table must be 'project.dataset.table', got '{}'",
                destination.table
            ))
        })?;

        // Drop any existing table; a missing table is not an error.
        match self.client.table().delete(project, dataset, table_id).await {
            Ok(()) => debug!("dropped existing table {}", destination.table),
            Err(e) => debug!("no existing table dropped ({e})"),
        }

        let metadata = Table {
            table_reference: TableReference {
                project_id: project.to_string(),
                dataset_id: dataset.to_string(),
                table_id: table_id.to_string(),
            },
            schema: Some(schema::derive_schema(table, registry)),
            ..Default::default()
        };
        self.client
            .table()
            .create(&metadata)
            .await
            .map_err(|e| {
                ExtractError::upload(destination.table.as_str(), format!("creating table: {e}"))
            })?;

        let mut loaded = 0usize;
        for batch_start in (0..table.num_rows()).step_by(INSERT_BATCH_ROWS) {
            let batch_end = (batch_start + INSERT_BATCH_ROWS).min(table.num_rows());
            let rows: Vec<Row<Value>> = (batch_start..batch_end)
                .map(|idx| Row {
                    insert_id: None,
                    json: schema::encode_row(table, idx),
                })
                .collect();

            let request = InsertAllRequest {
                rows,
                ..Default::default()
            };
            let response = self
                .client
                .tabledata()
                .insert(project, dataset, table_id, &request)
                .await
                .map_err(|e| {
                    ExtractError::upload(destination.table.as_str(), format!("inserting rows: {e}"))
                })?;

            if let Some(errors) = response.insert_errors {
                if !errors.is_empty() {
                    return Err(ExtractError::upload(
                        destination.table.as_str(),
                        format!("{} rows rejected by BigQuery", errors.len()),
                    ));
                }
            }
            loaded = batch_end;
        }

        info!("Loaded {loaded} rows into {}", destination.table);
        Ok(())
    }
}
