use crate::backends::{AnthropicBackend, GraphqlBackend};
use crate::config::AppConfig;
use crate::error::RecipeError;
use crate::query::RecipeQuery;

pub struct BackendFactory;

impl BackendFactory {
    /// Create a backend instance by name
    pub fn create(name: &str, config: &AppConfig) -> Result<Box<dyn RecipeQuery>, RecipeError> {
        match name {
            "graphql" => Ok(Box::new(GraphqlBackend::new(&config.graphql, config.timeout)?)),
            "anthropic" => Ok(Box::new(AnthropicBackend::new(
                &config.anthropic,
                config.timeout,
            )?)),
            _ => Err(RecipeError::UnknownBackend(name.to_string())),
        }
    }

    /// Create the backend named in configuration
    pub fn from_config(config: &AppConfig) -> Result<Box<dyn RecipeQuery>, RecipeError> {
        Self::create(&config.backend, config)
    }

    /// List all available backend names
    pub fn available_backends() -> Vec<&'static str> {
        vec!["graphql", "anthropic"]
    }
}
