//! Fake generation provider for testing.
//!
//! Returns canned responses without network access, and can be told to fail
//! with any [`GenerationError`] kind.

use crate::error::GenerationError;
use crate::providers::{LlmProvider, PromptPayload};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum FakeOutcome {
    Content(String),
    Unconfigured,
    QuotaExceeded,
    ApiError(u16),
}

/// A fake provider returning a fixed outcome and recording the prompts it saw.
#[derive(Debug)]
pub struct FakeProvider {
    outcome: FakeOutcome,
    calls: AtomicUsize,
    prompts: Mutex<Vec<PromptPayload>>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self::with_response(
            r#"{
                "name": "Fake Kitchen Special",
                "haveIngredients": [],
                "needIngredients": ["1 pinch of salt"],
                "steps": ["Combine everything.", "Serve."],
                "prepTime": "5 minutes",
                "cookTime": "10 minutes",
                "servings": 2,
                "difficulty": "easy",
                "nutritionalInfo": {"calories": "200 kcal", "protein": "5g", "carbs": "30g", "fats": "6g"},
                "tips": ["Taste as you go."]
            }"#,
        )
    }
}

impl FakeProvider {
    fn with_outcome(outcome: FakeOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with `content`.
    pub fn with_response(content: &str) -> Self {
        Self::with_outcome(FakeOutcome::Content(content.to_string()))
    }

    /// Always fail as an exhausted account.
    pub fn quota_exceeded() -> Self {
        Self::with_outcome(FakeOutcome::QuotaExceeded)
    }

    /// Always fail as a missing key.
    pub fn unconfigured() -> Self {
        Self::with_outcome(FakeOutcome::Unconfigured)
    }

    /// Always fail with the given HTTP status.
    pub fn api_error(status: u16) -> Self {
        Self::with_outcome(FakeOutcome::ApiError(status))
    }

    /// Number of `generate` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<PromptPayload> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    fn provider_name(&self) -> &str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }

    async fn generate(&self, prompt: &PromptPayload) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.clone());
        }

        match &self.outcome {
            FakeOutcome::Content(content) => Ok(content.clone()),
            FakeOutcome::Unconfigured => Err(GenerationError::Unconfigured(
                "fake provider has no key".to_string(),
            )),
            FakeOutcome::QuotaExceeded => Err(GenerationError::QuotaExceeded(
                "You exceeded your current quota".to_string(),
            )),
            FakeOutcome::ApiError(status) => Err(GenerationError::Api {
                status: *status,
                message: "fake failure".to_string(),
            }),
        }
    }
}
