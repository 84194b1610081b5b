//! Error types for market map extraction.
//!
//! Company lookups never produce errors: they degrade to an all-"N/A"
//! record. Everything else that can stop a run is represented here.

use thiserror::Error;

/// Top-level error type for MarketMap operations.
#[derive(Error, Debug)]
pub enum MarketMapError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Image could not be decoded or re-encoded
    #[error("Image error: {0}")]
    Encode(#[from] EncodeError),

    /// Vision provider call failed
    #[error("Vision error: {0}")]
    Vision(#[from] VisionError),

    /// A required API key is not available
    #[error("{name} API key is required.")]
    MissingCredential { name: &'static str },

    /// The vision provider answered, but not in the expected shape.
    ///
    /// `raw` holds the full response so it can be shown for debugging.
    #[error("Error extracting CSV content: {message}")]
    UnexpectedResponse {
        message: String,
        raw: serde_json::Value,
    },

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Image decoding and JPEG re-encoding errors.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// Upload has an extension we don't accept
    #[error("Unsupported image type '{0}' (expected jpg, jpeg or png)")]
    UnsupportedExtension(String),

    /// Image bytes could not be decoded
    #[error("Cannot decode image: {0}")]
    Decode(String),

    /// JPEG encoding failed
    #[error("Cannot encode image as JPEG: {0}")]
    Jpeg(String),
}

/// Vision provider errors. None of these are retried.
#[derive(Error, Debug)]
pub enum VisionError {
    /// The request never produced an HTTP response
    #[error("Vision request failed: {0}")]
    Request(String),

    /// Non-2xx HTTP status
    #[error("Vision HTTP {status_code}: {body}")]
    Http { status_code: u16, body: String },

    /// The response body was not JSON
    #[error("Failed to parse vision response: {0}")]
    Decode(String),
}

/// Convenience type alias for MarketMap results.
pub type Result<T> = std::result::Result<T, MarketMapError>;
