//! Search → select → details state machine for one company name.

use super::directory::CompanyDirectory;
use super::retry::{backoff_duration, Sleeper, TokioSleeper};
use crate::config::LookupConfig;
use crate::types::{CompanyRecord, NOT_AVAILABLE};
use futures_util::{stream, StreamExt};
use serde_json::Value;
use std::sync::Arc;

/// Where a single lookup currently stands.
#[derive(Debug)]
enum LookupState {
    /// Search request pending; `attempt` counts from 0.
    Searching { attempt: u32 },
    /// Search returned 200; body still to be decoded.
    Selecting(String),
    /// First entity found; fetching its fields.
    FetchingDetails(String),
    Succeeded(CompanyRecord),
    Failed,
}

/// Company lookup client with rate-limit backoff.
pub struct CompanyLookup {
    directory: Arc<dyn CompanyDirectory>,
    sleeper: Arc<dyn Sleeper>,
    max_attempts: u32,
    base_delay_ms: u64,
    parallel: usize,
}

impl CompanyLookup {
    pub fn new(directory: Arc<dyn CompanyDirectory>, config: &LookupConfig) -> Self {
        Self {
            directory,
            sleeper: Arc::new(TokioSleeper),
            max_attempts: config.max_attempts.max(1),
            base_delay_ms: config.base_delay_ms,
            parallel: config.parallel.max(1),
        }
    }

    /// Replace the backoff sleeper.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Look up one company. Never fails; unresolved fields are "N/A".
    pub async fn lookup(&self, name: &str, api_key: &str) -> CompanyRecord {
        let mut state = LookupState::Searching { attempt: 0 };
        loop {
            state = match state {
                LookupState::Searching { attempt } => self.search(name, api_key, attempt).await,
                LookupState::Selecting(body) => select_first(&body),
                LookupState::FetchingDetails(permalink) => {
                    self.fetch_details(name, &permalink, api_key).await
                }
                LookupState::Succeeded(record) => return record,
                LookupState::Failed => return CompanyRecord::not_available(name),
            };
        }
    }

    /// Look up every name, returning records in the same order as `names`.
    ///
    /// At most `parallel` lookups are in flight; `on_record` sees each
    /// record in order as soon as it and all earlier ones are done.
    pub async fn lookup_all<F>(
        &self,
        names: &[String],
        api_key: &str,
        mut on_record: F,
    ) -> Vec<CompanyRecord>
    where
        F: FnMut(&CompanyRecord),
    {
        let mut records = Vec::with_capacity(names.len());
        let mut lookups = stream::iter(names)
            .map(|name| self.lookup(name, api_key))
            .buffered(self.parallel);

        while let Some(record) = lookups.next().await {
            on_record(&record);
            records.push(record);
        }
        records
    }

    async fn search(&self, name: &str, api_key: &str, attempt: u32) -> LookupState {
        match self.directory.search(name, api_key).await {
            Ok(reply) if reply.status == 200 => LookupState::Selecting(reply.body),
            Ok(reply) if reply.status == 429 => {
                let next = attempt + 1;
                if next >= self.max_attempts {
                    tracing::warn!(
                        "Rate limit exceeded for {name:?}; giving up after {next} attempts"
                    );
                    return LookupState::Failed;
                }
                let delay = backoff_duration(attempt, self.base_delay_ms);
                tracing::warn!("Rate limit exceeded. Retrying in {delay:?}...");
                self.sleeper.sleep(delay).await;
                LookupState::Searching { attempt: next }
            }
            Ok(reply) => {
                tracing::error!("Search request failed with status code {}", reply.status);
                LookupState::Failed
            }
            Err(e) => {
                tracing::error!("{e}");
                LookupState::Failed
            }
        }
    }

    async fn fetch_details(&self, name: &str, permalink: &str, api_key: &str) -> LookupState {
        let reply = match self.directory.details(permalink, api_key).await {
            Ok(reply) if reply.status == 200 => reply,
            Ok(reply) => {
                tracing::error!("Details request failed with status code {}", reply.status);
                return LookupState::Failed;
            }
            Err(e) => {
                tracing::error!("{e}");
                return LookupState::Failed;
            }
        };

        let details: Value = match serde_json::from_str(&reply.body) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to decode JSON from details response: {e}");
                return LookupState::Failed;
            }
        };

        let properties = details.get("properties");
        LookupState::Succeeded(CompanyRecord {
            name: name.to_string(),
            website_url: field_value(properties, "website_url"),
            linkedin: field_value(properties, "linkedin"),
            short_description: field_value(properties, "short_description"),
        })
    }
}

/// Pick the first search hit. No ranking: first returned wins.
fn select_first(body: &str) -> LookupState {
    let search: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!("Failed to decode JSON from search response: {e}");
            return LookupState::Failed;
        }
    };

    let Some(entity) = search
        .get("entities")
        .and_then(Value::as_array)
        .and_then(|entities| entities.first())
    else {
        tracing::warn!("No entities found in search response");
        return LookupState::Failed;
    };

    match entity
        .get("identifier")
        .and_then(|id| id.get("permalink"))
        .and_then(Value::as_str)
    {
        Some(permalink) => LookupState::FetchingDetails(permalink.to_string()),
        None => {
            tracing::warn!("First search entity has no permalink");
            LookupState::Failed
        }
    }
}

/// Render one details property as text.
///
/// Link fields come back as `{"value": "..."}`; plain strings are used
/// directly. Missing or null fields become "N/A".
fn field_value(properties: Option<&Value>, key: &str) -> String {
    match properties.and_then(|p| p.get(key)) {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => match other.get("value").and_then(Value::as_str) {
            Some(s) => s.to_string(),
            None => other.to_string(),
        },
    }
}
