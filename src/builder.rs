use std::time::Duration;

use crate::config::{load_config, AppConfig};
use crate::error::FinderError;
use crate::finder::RecipeFinder;
use crate::providers::ProviderFactory;

/// Generation provider selectable from code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAI,
    Anthropic,
    Google,
    /// Canned responses, no network
    Fake,
}

impl ProviderKind {
    /// Convert to provider name string used by the factory
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Google => "google",
            ProviderKind::Fake => "fake",
        }
    }
}

/// Builder for configuring a [`RecipeFinder`]
#[derive(Debug, Default)]
pub struct RecipeFinderBuilder {
    config: Option<AppConfig>,
    provider: Option<ProviderKind>,
    timeout: Option<Duration>,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
}

impl RecipeFinderBuilder {
    /// Start from an explicit configuration instead of loading
    /// `recipe-finder.toml` and the environment.
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the generation provider
    ///
    /// # Example
    /// ```
    /// use recipe_finder::{ProviderKind, RecipeFinder};
    ///
    /// let builder = RecipeFinder::builder()
    ///     .provider(ProviderKind::Anthropic);
    /// ```
    pub fn provider(mut self, provider: ProviderKind) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set a timeout for generation requests
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the API key for the provider
    ///
    /// This allows passing the API key directly instead of relying on
    /// environment variables or config files.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Point the provider at a proxy or compatible endpoint
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Build the finder
    ///
    /// Unlike [`RecipeFinder::from_config`], an explicitly built finder
    /// refuses to start without a working provider.
    ///
    /// # Errors
    /// Returns `FinderError` if:
    /// - The configuration cannot be loaded
    /// - The provider is disabled, unknown or has no API key
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_finder::{ProviderKind, RecipeFinder};
    /// # fn main() -> Result<(), recipe_finder::FinderError> {
    /// let finder = RecipeFinder::builder()
    ///     .provider(ProviderKind::OpenAI)
    ///     .api_key("sk-...")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<RecipeFinder, FinderError> {
        let config = match self.config {
            Some(config) => config,
            None => load_config()?,
        };

        let provider_name = match self.provider {
            Some(kind) => kind.as_str().to_string(),
            None => config.default_provider.clone(),
        };

        let mut provider_config = config.provider_config(&provider_name);
        if let Some(api_key) = self.api_key {
            provider_config.api_key = Some(api_key);
        }
        if let Some(model) = self.model {
            provider_config.model = model;
        }
        if let Some(base_url) = self.base_url {
            provider_config.base_url = Some(base_url);
        }
        if let Some(timeout) = self.timeout {
            provider_config.timeout = timeout.as_secs().max(1);
        }

        let provider = ProviderFactory::create(&provider_name, &provider_config)?;
        Ok(RecipeFinder::new(provider))
    }
}
