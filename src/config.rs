//! Configuration types and loading

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default advisory service endpoint (local development server)
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8008";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "GRC_ADVISOR_URL";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Advisory service connection
    pub api: ApiConfig,
}

/// Advisory service connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Service base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: 120_000,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain, then apply the env override
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_file_chain(config_path)?;
        config.apply_base_url_override(std::env::var(BASE_URL_ENV).ok());
        Ok(config)
    }

    fn load_file_chain(config_path: Option<&PathBuf>) -> Result<Self> {
        // Explicit path must load or fail loudly
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Project-local config
        let local_config = PathBuf::from(".grc-advisor.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // User config: ~/.config/grc-advisor/config.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("grc-advisor").join("config.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Apply the `GRC_ADVISOR_URL` override when set and non-empty
    pub fn apply_base_url_override(&mut self, value: Option<String>) {
        if let Some(url) = value
            && !url.trim().is_empty()
        {
            self.api.base_url = url;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_ms, 120_000);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
api:
  base-url: http://advisor.internal:9000
  timeout-ms: 30000
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.api.base_url, "http://advisor.internal:9000");
        assert_eq!(config.api.timeout_ms, 30_000);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
api:
  base-url: http://advisor.internal:9000
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.api.base_url, "http://advisor.internal:9000");
        assert_eq!(config.api.timeout_ms, 120_000);
    }

    #[test]
    fn test_env_override_wins_over_file_value() {
        let mut config = Config::default();
        config.apply_base_url_override(Some("http://10.0.0.5:8008".to_string()));
        assert_eq!(config.api.base_url, "http://10.0.0.5:8008");
    }

    #[test]
    fn test_env_override_ignores_unset_and_blank() {
        let mut config = Config::default();

        config.apply_base_url_override(None);
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);

        config.apply_base_url_override(Some("  ".to_string()));
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "api:\n  base-url: http://example.test").unwrap();

        let config = Config::load_file_chain(Some(&path)).unwrap();
        assert_eq!(config.api.base_url, "http://example.test");
    }

    #[test]
    fn test_load_explicit_path_missing_fails() {
        let path = PathBuf::from("/nonexistent/grc-advisor.yml");
        assert!(Config::load_file_chain(Some(&path)).is_err());
    }
}
