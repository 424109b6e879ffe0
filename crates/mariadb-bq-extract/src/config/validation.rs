//! Configuration validation.

use super::Config;
use crate::error::{ExtractError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    // Source validation
    if config.source.host.is_empty() {
        return Err(ExtractError::Config("source.host is required".into()));
    }
    if config.source.database.is_empty() {
        return Err(ExtractError::Config("source.database is required".into()));
    }
    if config.source.user.is_empty() {
        return Err(ExtractError::Config("source.user is required".into()));
    }
    if config.source.port == 0 {
        return Err(ExtractError::Config(
            "source.port must be a valid port number".into(),
        ));
    }

    // Destination validation
    if config.destination.table.is_empty() {
        return Err(ExtractError::Config("destination.table is required".into()));
    }
    if config.destination.table_parts().is_none() {
        return Err(ExtractError::Config(format!(
            "destination.table must be 'project.dataset.table', got '{}'",
            config.destination.table
        )));
    }
    if config.destination.credentials.as_os_str().is_empty() {
        return Err(ExtractError::Config(
            "destination.credentials is required".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DestinationConfig, SourceConfig};
    use std::path::PathBuf;

    fn valid_config() -> Config {
        Config {
            source: SourceConfig {
                host: "localhost".to_string(),
                port: 3306,
                database: "source_db".to_string(),
                user: "maria".to_string(),
                password: "password".to_string(),
            },
            destination: DestinationConfig {
                table: "my-project.analytics.extract".to_string(),
                credentials: PathBuf::from("/etc/bq/service-account.json"),
            },
        }
    }

    #[test]
    fn test_valid_config() {
        let config = valid_config();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_missing_source_host() {
        let mut config = valid_config();
        config.source.host = "".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_missing_source_user() {
        let mut config = valid_config();
        config.source.user = "".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = valid_config();
        config.source.port = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_malformed_destination_table() {
        for bad in ["no_dots", "only.one", "a..b", ".dataset.table"] {
            let mut config = valid_config();
            config.destination.table = bad.to_string();
            assert!(validate(&config).is_err(), "accepted '{bad}'");
        }
    }

    #[test]
    fn test_table_parts_split() {
        let config = valid_config();
        assert_eq!(
            config.destination.table_parts(),
            Some(("my-project", "analytics", "extract"))
        );
    }

    #[test]
    fn test_source_config_debug_redacts_password() {
        let mut config = valid_config();
        config.source.password = "super_secret_password_123".to_string();
        let debug_output = format!("{:?}", config.source);
        assert!(
            debug_output.contains("[REDACTED]"),
            "Debug output should contain [REDACTED]"
        );
        assert!(
            !debug_output.contains("super_secret_password_123"),
            "Debug output should not contain actual password value"
        );
    }
}
