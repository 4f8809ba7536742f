use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Main service configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Generation provider to use when not specified
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Hosted backend for saved recipes and sign-in
    #[serde(default)]
    pub supabase: Option<SupabaseConfig>,
    #[serde(default)]
    pub server: ServerConfig,
    /// Number of cards on the "recent recipes" list
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    /// Number of records on the saved recipes page
    #[serde(default = "default_saved_limit")]
    pub saved_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: HashMap::new(),
            supabase: None,
            server: ServerConfig::default(),
            recent_limit: default_recent_limit(),
            saved_limit: default_saved_limit(),
        }
    }
}

/// Configuration for a specific generation provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gpt-4o-mini", "gemini-2.5-flash")
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// Defaults for a provider that has no entry in the configuration.
    pub fn for_provider(provider_name: &str) -> Self {
        let model = match provider_name {
            "anthropic" => "claude-sonnet-4-5",
            "google" => "gemini-2.5-flash",
            "fake" => "fake-model",
            _ => crate::providers::DEFAULT_OPENAI_MODEL,
        };

        Self {
            enabled: default_enabled(),
            model: model.to_string(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout: default_timeout(),
            api_key: None,
            base_url: None,
        }
    }
}

/// Supabase project used for persistence and identity
#[derive(Debug, Deserialize, Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: String,
    /// Public anon key sent as the `apikey` header
    pub anon_key: String,
    /// Table holding saved recipes
    #[serde(default = "default_recipes_table")]
    pub recipes_table: String,
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// HTTP server settings
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "openai".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_timeout() -> u64 {
    30
}

fn default_recent_limit() -> usize {
    3
}

fn default_saved_limit() -> usize {
    50
}

fn default_recipes_table() -> String {
    "saved_recipes".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. recipe-finder.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FINDER__PROVIDERS__OPENAI__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Settings for `provider_name`, falling back to that provider's defaults.
    pub fn provider_config(&self, provider_name: &str) -> ProviderConfig {
        self.providers
            .get(provider_name)
            .cloned()
            .unwrap_or_else(|| ProviderConfig::for_provider(provider_name))
    }
}

/// Load configuration from file and environment variables
///
/// Environment variable format: RECIPE_FINDER__PROVIDERS__OPENAI__API_KEY
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-finder").required(false))
        // Use double underscore for nested: RECIPE_FINDER__SERVER__PORT
        .add_source(
            Environment::with_prefix("RECIPE_FINDER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
