//! Company enrichment against a company-data provider.
//!
//! Lookups never fail: anything short of a successful search + details
//! round trip yields an all-"N/A" record for that name.

mod client;
mod crunchbase;
mod directory;
mod retry;

pub use client::CompanyLookup;
pub use crunchbase::CrunchbaseDirectory;
pub use directory::{ApiReply, CompanyDirectory};
pub use retry::{backoff_duration, Sleeper, TokioSleeper};
