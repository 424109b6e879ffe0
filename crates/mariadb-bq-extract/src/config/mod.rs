//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::Result;
use std::path::Path;

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml_round_trip() {
        let yaml = r#"
source:
  host: db.internal
  database: sales
  user: maria
  password: secret
destination:
  table: my-project.analytics.sales_extract
  credentials: /etc/bq/service-account.json
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.source.host, "db.internal");
        assert_eq!(config.source.port, 3306); // default
        assert_eq!(
            config.destination.table_parts(),
            Some(("my-project", "analytics", "sales_extract"))
        );
    }

    #[test]
    fn test_missing_section_is_config_error() {
        let yaml = "source:\n  host: db\n";
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_load_missing_file_is_error() {
        assert!(Config::load("definitely_not_here.yaml").is_err());
    }
}
