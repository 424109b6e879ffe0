//! MariaDB source: connection handling and query execution.
//!
//! Thin wrapper over sqlx's MySQL driver. The source owns a single
//! connection for the lifetime of one extraction and must be closed
//! explicitly on every exit path, success or failure, before the run
//! proceeds or aborts.

use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{Column as _, Row, TypeInfo, ValueRef};
use tracing::{debug, info};

use crate::config::SourceConfig;
use crate::core::{CellValue, ResultTable};
use crate::error::{ExtractError, Result};

/// Connection acquire timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// MariaDB query-execution collaborator.
pub struct MariaDbSource {
    pool: MySqlPool,
}

impl MariaDbSource {
    /// Connect to the source database and verify the connection.
    pub async fn connect(config: &SourceConfig) -> Result<Self> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.user)
            .password(&config.password);

        // One connection: the extraction is strictly sequential.
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(CONNECT_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|e| ExtractError::connection(e.to_string(), "connecting to MariaDB source"))?;

        // Test connection
        sqlx::query("SELECT 1")
            .fetch_one(&pool)
            .await
            .map_err(|e| {
                ExtractError::connection(e.to_string(), "testing MariaDB source connection")
            })?;

        info!(
            "Connected to MariaDB source: {}:{}/{}",
            config.host, config.port, config.database
        );

        Ok(Self { pool })
    }

    /// Execute the fixed extraction query and build a result table.
    ///
    /// Column names come from the statement's result metadata; cells are
    /// decoded by the reported column type into their closest
    /// [`CellValue`] representation.
    pub async fn fetch(&self, sql: &str) -> Result<ResultTable> {
        let rows: Vec<MySqlRow> = sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ExtractError::query(e.to_string()))?;

        let mut table = ResultTable::new();
        let Some(first) = rows.first() else {
            debug!("query returned no rows");
            return Ok(table);
        };

        let names: Vec<String> = first.columns().iter().map(|c| c.name().to_string()).collect();
        let mut columns: Vec<Vec<CellValue>> = vec![Vec::with_capacity(rows.len()); names.len()];

        for row in &rows {
            for (i, cells) in columns.iter_mut().enumerate() {
                cells.push(decode_cell(row, i));
            }
        }

        for (name, cells) in names.into_iter().zip(columns) {
            table.push_column(name, cells);
        }

        info!(
            "Fetched {} rows, {} columns from source",
            table.num_rows(),
            table.num_columns()
        );
        Ok(table)
    }

    /// Test the database connection.
    pub async fn test_connection(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                ExtractError::connection(e.to_string(), "testing MariaDB source connection")
            })?;
        Ok(())
    }

    /// Release the connection. Must be called on every exit path of the
    /// extraction step.
    pub async fn close(self) {
        self.pool.close().await;
        debug!("source connection closed");
    }
}

/// Decode one cell from a row by the column's reported type.
fn decode_cell(row: &MySqlRow, idx: usize) -> CellValue {
    // Handle NULL values
    let is_null: bool = row.try_get_raw(idx).map(|r| r.is_null()).unwrap_or(true);
    if is_null {
        return CellValue::Null;
    }

    let type_name = row.columns()[idx].type_info().name().to_uppercase();

    match type_name.as_str() {
        // Booleans (MariaDB BOOLEAN is TINYINT(1))
        "BOOLEAN" | "BOOL" => row
            .try_get::<bool, _>(idx)
            .map(CellValue::Bool)
            .unwrap_or(CellValue::Null),

        // Integer types
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "INTEGER" | "BIGINT" | "TINYINT UNSIGNED"
        | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED" | "BIGINT UNSIGNED" => row
            .try_get::<i64, _>(idx)
            .map(CellValue::Int)
            .unwrap_or(CellValue::Null),

        // Floating point
        "FLOAT" => row
            .try_get::<f32, _>(idx)
            .map(|v| CellValue::Float(v as f64))
            .unwrap_or(CellValue::Null),
        "DOUBLE" | "REAL" => row
            .try_get::<f64, _>(idx)
            .map(CellValue::Float)
            .unwrap_or(CellValue::Null),

        // Decimal
        "DECIMAL" | "NUMERIC" | "NEWDECIMAL" => row
            .try_get::<rust_decimal::Decimal, _>(idx)
            .map(CellValue::Decimal)
            .unwrap_or(CellValue::Null),

        // Date/Time types
        "DATE" => row
            .try_get::<chrono::NaiveDate, _>(idx)
            .map(CellValue::Date)
            .unwrap_or(CellValue::Null),
        "TIME" => row
            .try_get::<chrono::NaiveTime, _>(idx)
            .map(CellValue::Time)
            .unwrap_or(CellValue::Null),
        "DATETIME" | "TIMESTAMP" => row
            .try_get::<chrono::NaiveDateTime, _>(idx)
            .map(CellValue::Timestamp)
            .unwrap_or(CellValue::Null),

        // Binary types
        "BINARY" | "VARBINARY" | "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" => row
            .try_get::<Vec<u8>, _>(idx)
            .map(CellValue::Bytes)
            .unwrap_or(CellValue::Null),

        // Everything else (CHAR/VARCHAR/TEXT/ENUM/SET/JSON/...) reads as text
        _ => row
            .try_get::<String, _>(idx)
            .map(CellValue::Text)
            .unwrap_or(CellValue::Null),
    }
}
