use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - At least one cloud type is enabled
/// - CloudSaver base URL is not empty when the section is present
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.filter.enabled_cloud_types.is_empty() {
        return Err(ConfigError::ValidationError(
            "filter.enabled_cloud_types cannot be empty".to_string(),
        ));
    }

    if let Some(cloudsaver) = &config.cloudsaver {
        if cloudsaver.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "cloudsaver.base_url cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::CloudSaverConfig;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = Config::default();
        config.server.port = 0;
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_no_cloud_types_fails() {
        let mut config = Config::default();
        config.filter.enabled_cloud_types.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_cloudsaver_url_fails() {
        let mut config = Config::default();
        config.cloudsaver = Some(CloudSaverConfig {
            base_url: "  ".to_string(),
            token: String::new(),
            timeout_secs: 30,
        });
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("cloudsaver.base_url"));
    }
}
