//! Configuration management for MarketMap.
//!
//! Configuration is loaded from the platform config directory with defaults
//! for every value, so a missing file behaves like an empty one.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for MarketMap.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vision provider settings
    pub vision: VisionConfig,

    /// Company data lookup settings
    pub lookup: LookupConfig,

    /// API key sources
    pub credentials: CredentialsConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.marketmap.marketmap/config.toml
    /// - Linux: ~/.config/marketmap/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\marketmap\config\config.toml
    ///
    /// Falls back to ~/.marketmap/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "marketmap", "marketmap")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".marketmap").join("config.toml")
            })
    }

    /// Resolved log file path (with ~ expansion), or `None` when disabled.
    pub fn log_file(&self) -> Option<PathBuf> {
        if self.logging.file.trim().is_empty() {
            return None;
        }
        let expanded = shellexpand::tilde(&self.logging.file);
        Some(PathBuf::from(expanded.into_owned()))
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_env_var() {
        // Non-env-var strings pass through
        assert_eq!(resolve_env_var("plain-key"), Some("plain-key".to_string()));
        // Empty returns None
        assert_eq!(resolve_env_var(""), None);
        // Unset env var returns None
        assert_eq!(resolve_env_var("${DEFINITELY_NOT_SET_MARKETMAP_123}"), None);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.vision.model, "gpt-4o");
        assert_eq!(config.vision.max_tokens, 300);
        assert_eq!(config.lookup.max_attempts, 5);
        assert_eq!(config.lookup.base_delay_ms, 1000);
        assert_eq!(config.lookup.parallel, 1);
        assert_eq!(config.output.file_name, "enriched_market_map.csv");
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[vision]"));
        assert!(toml.contains("[lookup]"));
        assert!(toml.contains("[credentials]"));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[lookup]\nparallel = 3\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.lookup.parallel, 3);
        assert_eq!(config.lookup.max_attempts, 5);
        assert_eq!(config.vision.model, "gpt-4o");
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[lookup]\nmax_attempts = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("max_attempts"));
    }

    #[test]
    fn test_log_file_disabled_when_empty() {
        let mut config = Config::default();
        assert!(config.log_file().is_some());
        config.logging.file = String::new();
        assert!(config.log_file().is_none());
    }
}
