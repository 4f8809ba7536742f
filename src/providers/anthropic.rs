use crate::config::ProviderConfig;
use crate::error::GenerationError;
use crate::providers::{api_error_message, http_client, LlmProvider, PromptPayload};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, GenerationError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                GenerationError::Unconfigured(
                    "ANTHROPIC_API_KEY not found in config or environment".to_string(),
                )
            })?;

        Ok(AnthropicProvider {
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
impl LlmProvider for AnthropicProvider {
    fn provider_name(&self) -> &str {
        "anthropic"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &PromptPayload) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url.trim_end_matches('/')))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&json!({
                "model": self.model,
                "max_tokens": self.max_tokens,
                "temperature": self.temperature,
                "system": prompt.system,
                "messages": [
                    {
                        "role": "user",
                        "content": prompt.user
                    }
                ]
            }))
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;
        let response_body: Value = serde_json::from_str(&raw).unwrap_or(Value::Null);
        debug!("{:?}", response_body);

        if !status.is_success() {
            error!("Anthropic API error ({}): {}", status, raw);
            let message = api_error_message(&response_body, &raw);
            if status.as_u16() == 429 {
                return Err(GenerationError::QuotaExceeded(message));
            }
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let content = response_body["content"]
            .as_array()
            .and_then(|blocks| {
                blocks
                    .iter()
                    .find(|block| block["type"] == "text")
                    .and_then(|block| block["text"].as_str())
            })
            .ok_or_else(|| {
                GenerationError::Unparsable(
                    "Failed to extract content from Anthropic response".to_string(),
                )
            })?
            .to_string();

        Ok(content)
    }
}
