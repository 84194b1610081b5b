//! End-to-end run: image → vision model → candidate names → enriched rows.

use image::DynamicImage;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::config::{resolve_env_var, Config, CredentialsConfig};
use crate::encode::{check_extension, decode_image, ImageInput};
use crate::error::{EncodeError, MarketMapError, Result};
use crate::lookup::{CompanyLookup, CrunchbaseDirectory};
use crate::types::{CompanyRecord, EnrichedTable};
use crate::vision::{completion_text, parse_candidates, OpenAiVision, VisionClient};

/// The two API keys a run needs. Either may be missing until checked.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub openai_api_key: Option<String>,
    pub crunchbase_api_key: Option<String>,
}

impl Credentials {
    pub fn new(openai_api_key: Option<String>, crunchbase_api_key: Option<String>) -> Self {
        Self {
            openai_api_key: openai_api_key.filter(|k| !k.trim().is_empty()),
            crunchbase_api_key: crunchbase_api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Keys from the config file, resolving `${ENV_VAR}` references.
    pub fn from_config(config: &CredentialsConfig) -> Self {
        Self::new(
            resolve_env_var(&config.openai_api_key),
            resolve_env_var(&config.crunchbase_api_key),
        )
    }

    /// Fill keys missing here from `fallback`.
    pub fn or(self, fallback: Credentials) -> Self {
        Self {
            openai_api_key: self.openai_api_key.or(fallback.openai_api_key),
            crunchbase_api_key: self.crunchbase_api_key.or(fallback.crunchbase_api_key),
        }
    }

    /// Both keys, or the name of the first one missing.
    pub fn require(&self) -> Result<(&str, &str)> {
        let openai = self
            .openai_api_key
            .as_deref()
            .ok_or(MarketMapError::MissingCredential { name: "OpenAI" })?;
        let crunchbase = self
            .crunchbase_api_key
            .as_deref()
            .ok_or(MarketMapError::MissingCredential { name: "Crunchbase" })?;
        Ok((openai, crunchbase))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |k: &Option<String>| if k.is_some() { "<set>" } else { "<missing>" };
        f.debug_struct("Credentials")
            .field("openai_api_key", &mask(&self.openai_api_key))
            .field("crunchbase_api_key", &mask(&self.crunchbase_api_key))
            .finish()
    }
}

/// Progress notifications emitted during a run.
#[derive(Debug)]
pub enum Progress<'a> {
    /// The completion was parsed; this many lookups follow.
    CandidatesFound(usize),
    /// One more row is ready.
    Enriched(&'a CompanyRecord),
}

/// Read and decode an uploaded market map.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    check_extension(path)?;
    let bytes = std::fs::read(path)?;
    Ok(decode_image(&bytes)?)
}

/// Drives one extraction + enrichment run.
pub struct MarketMapper {
    vision: Box<dyn VisionClient>,
    lookup: CompanyLookup,
}

impl MarketMapper {
    /// Build with the OpenAI and Crunchbase clients described by `config`.
    pub fn new(config: &Config) -> Self {
        let log_bodies = config.logging.log_response_bodies;
        let vision = OpenAiVision::new(&config.vision, log_bodies);
        let directory = CrunchbaseDirectory::new(&config.lookup, log_bodies);
        Self::with_clients(
            Box::new(vision),
            CompanyLookup::new(Arc::new(directory), &config.lookup),
        )
    }

    pub fn with_clients(vision: Box<dyn VisionClient>, lookup: CompanyLookup) -> Self {
        Self { vision, lookup }
    }

    /// Extract startups from `image` and enrich each one.
    ///
    /// Credentials are checked before any request is made.
    pub async fn run<F>(
        &self,
        image: DynamicImage,
        credentials: &Credentials,
        mut on_progress: F,
    ) -> Result<EnrichedTable>
    where
        F: FnMut(Progress<'_>),
    {
        let (openai_key, crunchbase_key) = credentials.require()?;

        let input = tokio::task::spawn_blocking(move || ImageInput::from_image(&image))
            .await
            .map_err(|e| EncodeError::Jpeg(format!("Task join error: {e}")))??;

        tracing::info!("Extracting startups with {}", self.vision.name());
        let response = self.vision.extract(&input, openai_key).await?;

        let text = completion_text(&response).map(str::to_string);
        let Some(text) = text else {
            return Err(MarketMapError::UnexpectedResponse {
                message: "response has no choices[0].message.content".to_string(),
                raw: response,
            });
        };

        let names = parse_candidates(&text);
        tracing::info!("Found {} candidate startup(s)", names.len());
        on_progress(Progress::CandidatesFound(names.len()));

        let records = self
            .lookup
            .lookup_all(&names, crunchbase_key, |record| {
                on_progress(Progress::Enriched(record))
            })
            .await;

        Ok(EnrichedTable {
            records,
            raw_completion: text,
        })
    }
}
