//! Crunchbase v4 implementation of [`CompanyDirectory`].

use super::directory::{ApiReply, CompanyDirectory};
use crate::config::LookupConfig;
use crate::response_log::log_response;
use async_trait::async_trait;
use std::time::Duration;

/// Fields requested from the organization details endpoint.
pub const DETAIL_FIELDS: &str = "linkedin,website_url,short_description";

/// Crunchbase autocomplete + organization endpoints.
pub struct CrunchbaseDirectory {
    base_url: String,
    timeout: Duration,
    log_bodies: bool,
    client: reqwest::Client,
}

impl CrunchbaseDirectory {
    pub fn new(config: &LookupConfig, log_bodies: bool) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(config.timeout_ms),
            log_bodies,
            client: reqwest::Client::new(),
        }
    }

    fn search_url(&self) -> String {
        format!("{}/autocompletes", self.base_url)
    }

    fn details_url(&self, permalink: &str) -> String {
        format!("{}/entities/organizations/{permalink}", self.base_url)
    }

    async fn get(
        &self,
        label: &str,
        url: &str,
        query: &[(&str, &str)],
        api_key: &str,
    ) -> Result<ApiReply, String> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .header("accept", "application/json")
            .header("X-cb-user-key", api_key)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| format!("{label} request failed: {e}"))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| format!("Failed to read {label} response: {e}"))?;
        log_response(label, status, &body, self.log_bodies);
        Ok(ApiReply { status, body })
    }
}

#[async_trait]
impl CompanyDirectory for CrunchbaseDirectory {
    async fn search(&self, name: &str, api_key: &str) -> Result<ApiReply, String> {
        self.get("Search", &self.search_url(), &[("query", name)], api_key)
            .await
    }

    async fn details(&self, permalink: &str, api_key: &str) -> Result<ApiReply, String> {
        self.get(
            "Details",
            &self.details_url(permalink),
            &[("field_ids", DETAIL_FIELDS)],
            api_key,
        )
        .await
    }
}
