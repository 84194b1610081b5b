//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// Instruction sent alongside the market map image.
pub const DEFAULT_PROMPT: &str =
    "Write the startups listed in the market map and categorize them into a CSV.";

/// Vision (chat completion) provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    /// Chat completions endpoint
    pub endpoint: String,

    /// Model name
    pub model: String,

    /// Upper bound on generated tokens
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,

    /// Instruction text sent with the image
    pub prompt: String,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o".to_string(),
            max_tokens: 300,
            timeout_ms: 60_000,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

/// Company data provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// API base URL (search and details paths are appended)
    pub base_url: String,

    /// Total search attempts when rate limited
    pub max_attempts: u32,

    /// First backoff delay in milliseconds, doubled per retry
    pub base_delay_ms: u64,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,

    /// Lookups in flight at once. 1 keeps them strictly sequential.
    pub parallel: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.crunchbase.com/api/v4".to_string(),
            max_attempts: 5,
            base_delay_ms: 1000,
            timeout_ms: 30_000,
            parallel: 1,
        }
    }
}

/// Where API keys come from. Supports `${ENV_VAR}` syntax.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Vision provider key
    pub openai_api_key: String,

    /// Company data provider key
    pub crunchbase_api_key: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            openai_api_key: "${OPENAI_API_KEY}".to_string(),
            crunchbase_api_key: "${CRUNCHBASE_API_KEY}".to_string(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default name of the enriched CSV
    pub file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: "enriched_market_map.csv".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Console log format: "pretty" or "json"
    pub format: String,

    /// Append-only API log file. Empty disables it.
    pub file: String,

    /// Write full provider response bodies to the log.
    /// Off by default: bodies may contain data you don't want on disk.
    pub log_response_bodies: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: "marketmap_api.log".to_string(),
            log_response_bodies: false,
        }
    }
}
