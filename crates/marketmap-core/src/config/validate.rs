//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vision.endpoint.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "vision.endpoint must not be empty".into(),
            ));
        }
        if self.vision.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "vision.max_tokens must be > 0".into(),
            ));
        }
        if self.vision.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "vision.timeout_ms must be > 0".into(),
            ));
        }
        if self.lookup.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "lookup.base_url must not be empty".into(),
            ));
        }
        if self.lookup.max_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "lookup.max_attempts must be > 0".into(),
            ));
        }
        if self.lookup.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "lookup.timeout_ms must be > 0".into(),
            ));
        }
        if self.lookup.parallel == 0 {
            return Err(ConfigError::ValidationError(
                "lookup.parallel must be > 0".into(),
            ));
        }
        if self.output.file_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "output.file_name must not be empty".into(),
            ));
        }
        Ok(())
    }
}
