use crate::config::{AppConfig, ProviderConfig};
use crate::error::GenerationError;
use crate::providers::{
    AnthropicProvider, FakeProvider, GoogleProvider, LlmProvider, OpenAIProvider,
};

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
    ) -> Result<Box<dyn LlmProvider>, GenerationError> {
        // Validate that provider is enabled
        if !config.enabled {
            return Err(GenerationError::Unconfigured(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )));
        }

        match provider_name {
            "openai" => Ok(Box::new(OpenAIProvider::new(config)?)),
            "anthropic" => Ok(Box::new(AnthropicProvider::new(config)?)),
            "google" => Ok(Box::new(GoogleProvider::new(config)?)),
            "fake" => Ok(Box::new(FakeProvider::default())),
            _ => Err(GenerationError::Unconfigured(format!(
                "Unknown provider: {}",
                provider_name
            ))),
        }
    }

    /// Get the default provider from configuration
    ///
    /// A provider without its own section runs on that provider's defaults,
    /// so a bare `OPENAI_API_KEY` is enough.
    pub fn get_default_provider(config: &AppConfig) -> Result<Box<dyn LlmProvider>, GenerationError> {
        let provider_name = &config.default_provider;
        Self::create(provider_name, &config.provider_config(provider_name))
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["openai", "anthropic", "google", "fake"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn create_test_provider_config() -> ProviderConfig {
        ProviderConfig {
            api_key: Some("test-key".to_string()),
            model: "test-model".to_string(),
            ..ProviderConfig::for_provider("openai")
        }
    }

    #[test]
    fn test_create_openai_provider() {
        let config = create_test_provider_config();
        let provider = ProviderFactory::create("openai", &config).unwrap();
        assert_eq!(provider.provider_name(), "openai");
        assert_eq!(provider.model_name(), "test-model");
    }

    #[test]
    fn test_create_anthropic_provider() {
        let config = create_test_provider_config();
        let provider = ProviderFactory::create("anthropic", &config).unwrap();
        assert_eq!(provider.provider_name(), "anthropic");
    }

    #[test]
    fn test_create_google_provider() {
        let config = create_test_provider_config();
        let provider = ProviderFactory::create("google", &config).unwrap();
        assert_eq!(provider.provider_name(), "google");
    }

    #[test]
    fn test_create_fake_provider_needs_no_key() {
        let provider =
            ProviderFactory::create("fake", &ProviderConfig::for_provider("fake")).unwrap();
        assert_eq!(provider.provider_name(), "fake");
    }

    #[test]
    fn test_create_unknown_provider() {
        let config = create_test_provider_config();
        let result = ProviderFactory::create("unknown", &config);
        match result {
            Err(GenerationError::Unconfigured(message)) => {
                assert!(message.contains("Unknown provider"))
            }
            _ => panic!("expected unconfigured error"),
        }
    }

    #[test]
    fn test_create_disabled_provider() {
        let mut config = create_test_provider_config();
        config.enabled = false;

        let result = ProviderFactory::create("openai", &config);
        match result {
            Err(e) => assert!(e.to_string().contains("not enabled in configuration")),
            Ok(_) => panic!("disabled provider was created"),
        }
    }

    #[test]
    fn test_get_default_provider() {
        let mut providers = HashMap::new();
        providers.insert("openai".to_string(), create_test_provider_config());

        let app_config = AppConfig {
            default_provider: "openai".to_string(),
            providers,
            ..AppConfig::default()
        };

        let provider = ProviderFactory::get_default_provider(&app_config).unwrap();
        assert_eq!(provider.provider_name(), "openai");
    }

    #[test]
    fn test_get_default_provider_without_section_uses_defaults() {
        let app_config = AppConfig {
            default_provider: "fake".to_string(),
            ..AppConfig::default()
        };

        let provider = ProviderFactory::get_default_provider(&app_config).unwrap();
        assert_eq!(provider.model_name(), "fake-model");
    }

    #[test]
    fn test_available_providers() {
        let providers = ProviderFactory::available_providers();
        assert_eq!(providers.len(), 4);
        assert!(providers.contains(&"openai"));
        assert!(providers.contains(&"anthropic"));
        assert!(providers.contains(&"google"));
    }
}
