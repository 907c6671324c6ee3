use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// OMDb catalog configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// OMDb API key (required)
    pub api_key: String,
    /// Catalog endpoint (default: http://www.omdbapi.com/)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl CatalogConfig {
    /// Catalog configuration with defaults for everything but the key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://www.omdbapi.com/".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Local persistence configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("popcorn.db")
}

/// Display configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Label shown while no title is open.
    #[serde(default = "default_title")]
    pub default_title: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_title: default_title(),
        }
    }
}

fn default_title() -> String {
    "usePopcorn".to_string()
}

/// Sanitized config for logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub catalog: SanitizedCatalogConfig,
    pub storage: StorageConfig,
    pub display: DisplayConfig,
}

/// Sanitized catalog config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCatalogConfig {
    pub base_url: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            catalog: SanitizedCatalogConfig {
                base_url: config.catalog.base_url.clone(),
                api_key_configured: !config.catalog.api_key.is_empty(),
                timeout_secs: config.catalog.timeout_secs,
            },
            storage: config.storage.clone(),
            display: config.display.clone(),
        }
    }
}
