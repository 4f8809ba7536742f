mod anthropic;
mod factory;
mod fake;
mod google;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use fake::FakeProvider;
pub use google::GoogleProvider;
pub use open_ai::{OpenAIProvider, DEFAULT_OPENAI_MODEL};
pub use prompt::{build_user_prompt, PromptPayload, RECIPE_SYSTEM_PROMPT};

use crate::error::GenerationError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Unified trait for all recipe generation providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Get the model identifier requests are sent to
    fn model_name(&self) -> &str;

    /// Send the prompt and return the raw text content of the answer
    async fn generate(&self, prompt: &PromptPayload) -> Result<String, GenerationError>;
}

/// HTTP client shared by the network providers.
pub(crate) fn http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Best-effort extraction of a human readable message from an error body.
pub(crate) fn api_error_message(body: &serde_json::Value, raw: &str) -> String {
    body["error"]["message"]
        .as_str()
        .or_else(|| body["error"].as_str())
        .or_else(|| body["message"].as_str())
        .map(String::from)
        .unwrap_or_else(|| raw.trim().to_string())
}
