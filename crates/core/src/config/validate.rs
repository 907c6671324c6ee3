use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Catalog API key is set
/// - Catalog base URL is set
/// - Request timeout is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.catalog.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "catalog.api_key cannot be empty".to_string(),
        ));
    }

    if config.catalog.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "catalog.base_url cannot be empty".to_string(),
        ));
    }

    if config.catalog.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "catalog.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CatalogConfig, DisplayConfig, StorageConfig};

    fn config_with(catalog: CatalogConfig) -> Config {
        Config {
            catalog,
            storage: StorageConfig::default(),
            display: DisplayConfig::default(),
        }
    }

    #[test]
    fn test_validate_valid_config() {
        let config = config_with(CatalogConfig::with_api_key("key"));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_api_key_fails() {
        let config = config_with(CatalogConfig::with_api_key("  "));
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_zero_timeout_fails() {
        let mut catalog = CatalogConfig::with_api_key("key");
        catalog.timeout_secs = 0;
        let err = validate_config(&config_with(catalog)).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }
}
