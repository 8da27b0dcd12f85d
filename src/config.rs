use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Top-level application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Backend used to answer recipe queries ("graphql" or "anthropic")
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Managed GraphQL data endpoint settings
    #[serde(default)]
    pub graphql: GraphqlConfig,
    /// Direct model access settings
    #[serde(default)]
    pub anthropic: ModelConfig,
    /// Request timeout in seconds. No timeout when unset.
    #[serde(default)]
    pub timeout: Option<u64>,
}

/// Settings for the managed GraphQL data API
#[derive(Debug, Deserialize, Clone, Default)]
pub struct GraphqlConfig {
    /// Full URL of the GraphQL endpoint
    pub endpoint: Option<String>,
    /// API key sent as `x-api-key`
    pub api_key: Option<String>,
    /// Pre-issued token sent as `Authorization`, takes precedence over the API key
    pub auth_token: Option<String>,
}

/// Settings for calling the hosted model directly
#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            graphql: GraphqlConfig::default(),
            anthropic: ModelConfig::default(),
            timeout: None,
        }
    }
}

// Default value functions
fn default_backend() -> String {
    "graphql".to_string()
}

fn default_model() -> String {
    "claude-3-sonnet-20240229".to_string()
}

fn default_temperature() -> f32 {
    0.5
}

fn default_max_tokens() -> u32 {
    1000
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE__GRAPHQL__ENDPOINT
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the precedence rules.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE__GRAPHQL__API_KEY
        .add_source(
            Environment::with_prefix("RECIPE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_values() {
        assert_eq!(default_backend(), "graphql");
        assert_eq!(default_temperature(), 0.5);
        assert_eq!(default_max_tokens(), 1000);
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.backend, "graphql");
        assert!(config.graphql.endpoint.is_none());
        assert!(config.timeout.is_none());
        assert_eq!(config.anthropic.max_tokens, 1000);
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let settings = Config::builder()
            .add_source(File::from_str(
                r#"
                backend = "anthropic"
                timeout = 20

                [anthropic]
                model = "claude-test"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: AppConfig = settings.try_deserialize().unwrap();
        assert_eq!(config.backend, "anthropic");
        assert_eq!(config.timeout, Some(20));
        assert_eq!(config.anthropic.model, "claude-test");
        assert_eq!(config.anthropic.temperature, 0.5);
        assert!(config.graphql.api_key.is_none());
    }

    #[test]
    fn test_load_config_from_prefixed_env() {
        env::set_var("RECIPE__BACKEND", "anthropic");
        env::set_var("RECIPE__GRAPHQL__ENDPOINT", "https://example.invalid/graphql");

        let result = load_config();

        env::remove_var("RECIPE__BACKEND");
        env::remove_var("RECIPE__GRAPHQL__ENDPOINT");

        let config = result.unwrap();
        assert_eq!(config.backend, "anthropic");
        assert_eq!(
            config.graphql.endpoint.as_deref(),
            Some("https://example.invalid/graphql")
        );
    }
}
