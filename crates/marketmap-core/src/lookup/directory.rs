//! Transport seam for the company-data provider.

use async_trait::async_trait;

/// Status and body of a provider HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    pub status: u16,
    pub body: String,
}

impl ApiReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// The two endpoints a company lookup needs.
///
/// `Err` means no HTTP response was received at all (connection failure,
/// timeout); the message is for logging only.
#[async_trait]
pub trait CompanyDirectory: Send + Sync {
    /// Autocomplete search by free-text company name.
    async fn search(&self, name: &str, api_key: &str) -> Result<ApiReply, String>;

    /// Website, LinkedIn and short description for one organization.
    async fn details(&self, permalink: &str, api_key: &str) -> Result<ApiReply, String>;
}
