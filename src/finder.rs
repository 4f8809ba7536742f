//! Response reconciliation.
//!
//! [`RecipeFinder`] turns a form submission into exactly one [`Recipe`]: the
//! generated one when the provider answers with something usable, the
//! synthesized one otherwise. Failures never escape as errors; they ride
//! along as a [`Degradation`].

use crate::builder::RecipeFinderBuilder;
use crate::config::AppConfig;
use crate::error::GenerationError;
use crate::model::{parse_generated_recipe, Recipe};
use crate::providers::{LlmProvider, PromptPayload, ProviderFactory};
use crate::request::{self, RecipeForm, RecipeRequest};
use crate::synthesizer::synthesize;
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a synthesized recipe was returned instead of a generated one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    NoIngredients,
    Unconfigured,
    QuotaExceeded,
    TransportError,
    Unparsable,
    InvalidRequest,
}

impl FailureReason {
    /// Machine-readable tag sent as `errorType`.
    pub fn error_type(&self) -> &'static str {
        match self {
            FailureReason::NoIngredients => "no_ingredients",
            FailureReason::Unconfigured => "unconfigured",
            FailureReason::QuotaExceeded => "quota_exceeded",
            FailureReason::TransportError => "transport_error",
            FailureReason::Unparsable => "unparsable",
            FailureReason::InvalidRequest => "invalid_request",
        }
    }

    /// Default `errorMessage` for this reason.
    pub fn message(&self) -> &'static str {
        match self {
            FailureReason::NoIngredients => "No ingredients provided",
            FailureReason::Unconfigured => "Recipe generation service not configured",
            FailureReason::QuotaExceeded => "Recipe generation quota exceeded",
            FailureReason::TransportError => "Error calling recipe generation service",
            FailureReason::Unparsable => "Failed to parse recipe data",
            FailureReason::InvalidRequest => "Invalid recipe request",
        }
    }

    /// Text to show the user next to the fallback recipe. Quota exhaustion
    /// gets its own wording; every other failure shares one.
    pub fn notice(&self) -> &'static str {
        match self {
            FailureReason::QuotaExceeded => {
                "Recipe generation quota exceeded. Using a demonstration recipe instead."
            }
            _ => "Failed to generate recipe. Using a fallback recipe instead.",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.error_type())
    }
}

impl From<&GenerationError> for FailureReason {
    fn from(err: &GenerationError) -> Self {
        match err {
            GenerationError::Unconfigured(_) => FailureReason::Unconfigured,
            GenerationError::QuotaExceeded(_) => FailureReason::QuotaExceeded,
            GenerationError::Api { .. } | GenerationError::Transport(_) => {
                FailureReason::TransportError
            }
            GenerationError::Unparsable(_) => FailureReason::Unparsable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Degradation {
    pub reason: FailureReason,
    pub message: String,
}

impl Degradation {
    pub fn new(reason: FailureReason) -> Self {
        Self {
            reason,
            message: reason.message().to_string(),
        }
    }
}

/// Outcome of one submission: always a recipe, plus the failure that forced
/// a fallback, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedRecipe {
    pub recipe: Recipe,
    pub degraded: Option<Degradation>,
}

impl GeneratedRecipe {
    pub fn generated(recipe: Recipe) -> Self {
        Self {
            recipe,
            degraded: None,
        }
    }

    pub fn fallback(recipe: Recipe, degradation: Degradation) -> Self {
        Self {
            recipe,
            degraded: Some(degradation),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }

    pub fn reason(&self) -> Option<FailureReason> {
        self.degraded.as_ref().map(|d| d.reason)
    }

    /// Flatten into the wire shape.
    pub fn into_response(self) -> RecipeResponse {
        let (error, error_type, error_message) = match self.degraded {
            Some(degradation) => (
                Some(true),
                Some(degradation.reason.error_type().to_string()),
                Some(degradation.message),
            ),
            None => (None, None, None),
        };

        RecipeResponse {
            recipe: self.recipe,
            error,
            error_type,
            error_message,
        }
    }
}

/// Wire shape: the recipe fields plus `error`, `errorType` and
/// `errorMessage` when the recipe is a fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    #[serde(flatten)]
    pub recipe: Recipe,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Generates recipes with one provider, falling back to synthesis.
pub struct RecipeFinder {
    provider: Option<Box<dyn LlmProvider>>,
    unavailable: Option<String>,
}

impl RecipeFinder {
    pub fn new(provider: Box<dyn LlmProvider>) -> Self {
        Self {
            provider: Some(provider),
            unavailable: None,
        }
    }

    /// A finder that always synthesizes, reporting `Unconfigured`.
    pub fn without_provider() -> Self {
        Self {
            provider: None,
            unavailable: None,
        }
    }

    /// Build the configured default provider.
    ///
    /// A provider that cannot be built (missing key, unknown name) is not an
    /// error here: the finder still answers, with fallback recipes.
    pub fn from_config(config: &AppConfig) -> Self {
        match ProviderFactory::get_default_provider(config) {
            Ok(provider) => {
                info!(
                    "Using {} provider with model {}",
                    provider.provider_name(),
                    provider.model_name()
                );
                Self::new(provider)
            }
            Err(e) => {
                warn!("Recipe generation unavailable, serving fallback recipes: {}", e);
                Self {
                    provider: None,
                    unavailable: Some(e.to_string()),
                }
            }
        }
    }

    pub fn builder() -> RecipeFinderBuilder {
        RecipeFinderBuilder::default()
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Name of the provider in use, if any
    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_ref().map(|p| p.provider_name())
    }

    /// Produce a recipe for a form submission.
    pub async fn find(&self, form: &RecipeForm) -> GeneratedRecipe {
        let (request, prompt) = request::build(form);
        self.find_request(&request, &prompt).await
    }

    /// Produce a recipe for a raw JSON body. A body that does not decode
    /// yields the fallback for an empty form.
    pub async fn find_json(&self, body: &[u8]) -> GeneratedRecipe {
        match serde_json::from_slice::<RecipeForm>(body) {
            Ok(form) => self.find(&form).await,
            Err(e) => {
                warn!("Rejecting recipe request body: {}", e);
                let request = RecipeRequest::from_form(&RecipeForm::default());
                GeneratedRecipe::fallback(
                    synthesize(&request),
                    Degradation {
                        reason: FailureReason::InvalidRequest,
                        message: format!("Invalid recipe request: {}", e),
                    },
                )
            }
        }
    }

    /// Produce a recipe for an already normalized request.
    pub async fn find_request(
        &self,
        request: &RecipeRequest,
        prompt: &PromptPayload,
    ) -> GeneratedRecipe {
        if request.ingredients_missing() {
            info!("No ingredients provided, synthesizing a recipe");
            return GeneratedRecipe::fallback(
                synthesize(request),
                Degradation::new(FailureReason::NoIngredients),
            );
        }

        let Some(provider) = self.provider.as_ref() else {
            if let Some(reason) = &self.unavailable {
                debug!("Provider unavailable: {}", reason);
            }
            return GeneratedRecipe::fallback(
                synthesize(request),
                Degradation::new(FailureReason::Unconfigured),
            );
        };

        info!(
            "Generating recipe with {} for: {}",
            provider.provider_name(),
            request.ingredients().join(", ")
        );

        let outcome = match provider.generate(prompt).await {
            Ok(content) => {
                debug!("Generation service returned: {}", content);
                parse_generated_recipe(&content, request)
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(recipe) => GeneratedRecipe::generated(recipe),
            Err(e) => {
                error!("Recipe generation failed, synthesizing instead: {}", e);
                let reason = FailureReason::from(&e);
                GeneratedRecipe::fallback(synthesize(request), Degradation::new(reason))
            }
        }
    }
}
