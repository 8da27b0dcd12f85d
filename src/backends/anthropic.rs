use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;

use crate::backends::build_recipe_prompt;
use crate::config::ModelConfig;
use crate::error::RecipeError;
use crate::query::{QueryOutcome, QueryResponse, RecipeQuery};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Asks the hosted model directly, shaping its reply like the managed query
pub struct AnthropicBackend {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AnthropicBackend {
    /// Create a new Anthropic backend from configuration
    pub fn new(config: &ModelConfig, timeout: Option<u64>) -> Result<Self, RecipeError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .ok_or_else(|| {
                RecipeError::MissingSetting(
                    "ANTHROPIC_API_KEY not found in config or environment".to_string(),
                )
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(AnthropicBackend {
            client: super::http_client(timeout)?,
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        AnthropicBackend {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.5,
            max_tokens: 1000,
        }
    }
}

/// Map a messages API reply onto the `{body, error}` payload.
///
/// API-reported errors become the payload's `error` field rather than a
/// raised error, the same way the managed resolver reports them.
fn to_outcome(response_body: &Value) -> Result<QueryOutcome, RecipeError> {
    if let Some(message) = response_body["error"]["message"].as_str() {
        return Ok(QueryOutcome {
            data: Some(QueryResponse {
                body: None,
                error: Some(message.to_string()),
            }),
            errors: None,
        });
    }

    let text = response_body["content"][0]["text"].as_str().ok_or_else(|| {
        RecipeError::InvalidResponse("Failed to extract content from Anthropic response".to_string())
    })?;

    Ok(QueryOutcome::with_body(text))
}

#[async_trait]
impl RecipeQuery for AnthropicBackend {
    fn backend_name(&self) -> &str {
        "anthropic"
    }

    async fn ask(
        &self,
        ingredients: &[String],
    ) -> Result<QueryOutcome, Box<dyn Error + Send + Sync>> {
        let prompt = build_recipe_prompt(ingredients);

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&json!({
                "model": self.model,
                "max_tokens": self.max_tokens,
                "temperature": self.temperature,
                "messages": [
                    {
                        "role": "user",
                        "content": [{ "type": "text", "text": prompt }]
                    }
                ]
            }))
            .send()
            .await
            .map_err(RecipeError::from)?;

        let response_body: Value = response.json().await.map_err(RecipeError::from)?;
        debug!("{:?}", response_body);

        Ok(to_outcome(&response_body)?)
    }
}
