//! MarketMap Core - turn a startup market map image into enriched rows.
//!
//! # Architecture
//!
//! ```text
//! Image → JPEG/base64 → Vision model → "Category,Name" lines → Company lookup → CSV
//! ```
//!
//! Lookups degrade to "N/A" fields instead of failing; only credential,
//! image and vision-provider problems abort a run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use marketmap_core::{load_image, Config, Credentials, MarketMapper};
//!
//! #[tokio::main]
//! async fn main() -> marketmap_core::Result<()> {
//!     let config = Config::load()?;
//!     let mapper = MarketMapper::new(&config);
//!     let credentials = Credentials::from_config(&config.credentials);
//!
//!     let image = load_image("./market_map.png".as_ref())?;
//!     let table = mapper.run(image, &credentials, |_| {}).await?;
//!     marketmap_core::output::write_csv(&table.records, std::io::stdout())?;
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod encode;
pub mod error;
pub mod lookup;
pub mod output;
pub mod pipeline;
pub mod types;
pub mod vision;

mod response_log;

#[cfg(test)]
mod test_support;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, EncodeError, MarketMapError, Result, VisionError};
pub use pipeline::{load_image, Credentials, MarketMapper, Progress};
pub use response_log::RESPONSE_TARGET;
pub use types::{CompanyRecord, EnrichedTable, NOT_AVAILABLE};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
