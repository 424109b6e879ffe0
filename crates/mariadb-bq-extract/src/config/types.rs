//! Configuration type definitions.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Source database configuration (MariaDB).
    pub source: SourceConfig,

    /// Warehouse destination configuration (BigQuery).
    pub destination: DestinationConfig,
}

/// Source database (MariaDB) configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Database host.
    pub host: String,

    /// Database port (default: 3306).
    #[serde(default = "default_mariadb_port")]
    pub port: u16,

    /// Database name.
    pub database: String,

    /// Username.
    pub user: String,

    /// Password.
    pub password: String,
}

// Manual Debug so the password never reaches a log line.
impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Warehouse destination (BigQuery) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationConfig {
    /// Fully qualified destination table: `project.dataset.table`.
    pub table: String,

    /// Path to the service-account credentials JSON file.
    pub credentials: PathBuf,
}

impl DestinationConfig {
    /// Split the destination id into (project, dataset, table).
    ///
    /// Validation guarantees the three-part shape; this helper is for use
    /// after a successful `Config::validate`.
    #[must_use]
    pub fn table_parts(&self) -> Option<(&str, &str, &str)> {
        let mut parts = self.table.splitn(3, '.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(p), Some(d), Some(t)) if !p.is_empty() && !d.is_empty() && !t.is_empty() => {
                Some((p, d, t))
            }
            _ => None,
        }
    }
}

fn default_mariadb_port() -> u16 {
    3306
}
