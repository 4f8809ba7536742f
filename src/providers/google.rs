use crate::config::ProviderConfig;
use crate::error::GenerationError;
use crate::providers::{api_error_message, http_client, LlmProvider, PromptPayload};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GoogleProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GoogleProvider {
    /// Create a new Google Gemini provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, GenerationError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                GenerationError::Unconfigured(
                    "GOOGLE_API_KEY not found in config or environment".to_string(),
                )
            })?;

        Ok(GoogleProvider {
            client: http_client(Duration::from_secs(config.timeout)),
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl LlmProvider for GoogleProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &PromptPayload) -> Result<String, GenerationError> {
        // Google Gemini API endpoint
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&json!({
                "systemInstruction": {
                    "parts": [{"text": prompt.system}]
                },
                "contents": [{
                    "role": "user",
                    "parts": [{"text": prompt.user}]
                }],
                "generationConfig": {
                    "temperature": self.temperature,
                    "maxOutputTokens": self.max_tokens,
                    "responseMimeType": "application/json"
                }
            }))
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;
        let response_body: Value = serde_json::from_str(&raw).unwrap_or(Value::Null);
        debug!("{:?}", response_body);

        if !status.is_success() {
            error!("Google Gemini API error ({}): {}", status, raw);
            let message = api_error_message(&response_body, &raw);
            if status.as_u16() == 429 || response_body["error"]["status"] == "RESOURCE_EXHAUSTED" {
                return Err(GenerationError::QuotaExceeded(message));
            }
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let content = response_body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                GenerationError::Unparsable(
                    "Failed to extract content from Google Gemini response".to_string(),
                )
            })?
            .to_string();

        Ok(content)
    }
}
