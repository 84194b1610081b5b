//! OpenAI vision client using the Chat Completions API.
//!
//! Sends the instruction and the image (as a data URL) in a single user
//! message and hands back the decoded JSON untouched.

use crate::config::VisionConfig;
use crate::encode::ImageInput;
use crate::error::VisionError;
use crate::response_log::log_response;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// A multimodal completion endpoint that can read a market map.
///
/// Uses `async_trait` so the pipeline can hold a `Box<dyn VisionClient>`.
#[async_trait]
pub trait VisionClient: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Send the image with the extraction instruction and return the raw response.
    async fn extract(
        &self,
        image: &ImageInput,
        api_key: &str,
    ) -> Result<serde_json::Value, VisionError>;
}

/// OpenAI provider using Chat Completions API.
pub struct OpenAiVision {
    model: String,
    prompt: String,
    max_tokens: u32,
    endpoint: String,
    timeout: Duration,
    log_bodies: bool,
    client: reqwest::Client,
}

impl OpenAiVision {
    pub fn new(config: &VisionConfig, log_bodies: bool) -> Self {
        Self {
            model: config.model.clone(),
            prompt: config.prompt.clone(),
            max_tokens: config.max_tokens,
            endpoint: config.endpoint.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
            log_bodies,
            client: reqwest::Client::new(),
        }
    }

    fn request_body(&self, image: &ImageInput) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ChatContent::Text {
                        text: self.prompt.clone(),
                    },
                    ChatContent::ImageUrl {
                        image_url: ImageUrl {
                            url: image.data_url(),
                        },
                    },
                ],
            }],
        }
    }
}

// --- Request types ---

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: Vec<ChatContent>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum ChatContent {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[async_trait]
impl VisionClient for OpenAiVision {
    fn name(&self) -> &str {
        "openai"
    }

    async fn extract(
        &self,
        image: &ImageInput,
        api_key: &str,
    ) -> Result<serde_json::Value, VisionError> {
        let body = self.request_body(image);
        tracing::debug!(model = %self.model, "Sending market map to {}", self.name());

        let resp = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| VisionError::Request(format!("OpenAI request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| VisionError::Request(format!("Failed to read OpenAI response: {e}")))?;
        log_response("OpenAI", status.as_u16(), &text, self.log_bodies);

        if !status.is_success() {
            return Err(VisionError::Http {
                status_code: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| VisionError::Decode(e.to_string()))
    }
}
