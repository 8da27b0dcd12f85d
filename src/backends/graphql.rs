use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::error::Error;

use crate::config::GraphqlConfig;
use crate::error::RecipeError;
use crate::query::{ApiError, QueryOutcome, QueryResponse, RecipeQuery};

/// The custom query exposed by the managed data API
pub const ASK_BEDROCK_QUERY: &str = "query AskBedrock($ingredients: [String]) {
  askBedrock(ingredients: $ingredients) {
    body
    error
  }
}";

#[derive(Debug, Deserialize)]
struct GraphqlEnvelope {
    #[serde(default)]
    data: Option<AskBedrockData>,
    #[serde(default)]
    errors: Option<Vec<ApiError>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AskBedrockData {
    #[serde(default)]
    ask_bedrock: Option<QueryResponse>,
}

impl From<GraphqlEnvelope> for QueryOutcome {
    fn from(envelope: GraphqlEnvelope) -> Self {
        QueryOutcome {
            data: envelope.data.and_then(|d| d.ask_bedrock),
            errors: envelope.errors,
        }
    }
}

/// Sends the `askBedrock` query to a managed GraphQL endpoint
pub struct GraphqlBackend {
    client: Client,
    endpoint: String,
    headers: HeaderMap,
}

impl GraphqlBackend {
    /// Create a new GraphQL backend from configuration
    pub fn new(config: &GraphqlConfig, timeout: Option<u64>) -> Result<Self, RecipeError> {
        // Try config first, then fall back to environment variables
        let endpoint = config
            .endpoint
            .clone()
            .or_else(|| std::env::var("RECIPE_API_ENDPOINT").ok())
            .ok_or_else(|| {
                RecipeError::MissingSetting(
                    "GraphQL endpoint not found in config or RECIPE_API_ENDPOINT".to_string(),
                )
            })?;
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("RECIPE_API_KEY").ok());

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.auth_token {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(token)?);
        } else if let Some(key) = &api_key {
            headers.insert("x-api-key", HeaderValue::from_str(key)?);
        }

        Ok(GraphqlBackend {
            client: super::http_client(timeout)?,
            endpoint,
            headers,
        })
    }

    #[doc(hidden)]
    pub fn with_endpoint(endpoint: String, api_key: Option<String>) -> Result<Self, RecipeError> {
        let config = GraphqlConfig {
            endpoint: Some(endpoint),
            api_key,
            auth_token: None,
        };
        Self::new(&config, None)
    }
}

#[async_trait]
impl RecipeQuery for GraphqlBackend {
    fn backend_name(&self) -> &str {
        "graphql"
    }

    async fn ask(
        &self,
        ingredients: &[String],
    ) -> Result<QueryOutcome, Box<dyn Error + Send + Sync>> {
        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(&json!({
                "query": ASK_BEDROCK_QUERY,
                "variables": { "ingredients": ingredients }
            }))
            .send()
            .await
            .map_err(RecipeError::from)?;

        let status = response.status();
        let text = response.text().await.map_err(RecipeError::from)?;
        debug!("GraphQL response ({}): {}", status, text);

        // GraphQL servers report auth and validation problems in the body,
        // sometimes with a non-success status.
        match serde_json::from_str::<GraphqlEnvelope>(&text) {
            Ok(envelope) => Ok(envelope.into()),
            Err(_) if !status.is_success() => Err(RecipeError::Status {
                status: status.as_u16(),
                body: text,
            }
            .into()),
            Err(e) => Err(RecipeError::InvalidResponse(e.to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn ingredients() -> Vec<String> {
        vec!["chicken".to_string(), "rice".to_string()]
    }

    #[tokio::test]
    async fn test_ask_returns_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/graphql")
            .match_header("x-api-key", "da2-test")
            .match_body(Matcher::PartialJson(json!({
                "variables": { "ingredients": ["chicken", "rice"] }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"askBedrock": {"body": "Chicken fried rice", "error": ""}}}"#)
            .create_async()
            .await;

        let backend = GraphqlBackend::with_endpoint(
            format!("{}/graphql", server.url()),
            Some("da2-test".to_string()),
        )
        .unwrap();

        let outcome = backend.ask(&ingredients()).await.unwrap();
        assert_eq!(
            outcome.data,
            Some(QueryResponse {
                body: Some("Chicken fried rice".to_string()),
                error: Some(String::new()),
            })
        );
        assert!(outcome.errors.is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_request_carries_query_text() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/graphql")
            .match_body(Matcher::PartialJson(json!({ "query": ASK_BEDROCK_QUERY })))
            .with_status(200)
            .with_body(r#"{"data": {"askBedrock": null}}"#)
            .create_async()
            .await;

        let backend =
            GraphqlBackend::with_endpoint(format!("{}/graphql", server.url()), None).unwrap();

        let outcome = backend.ask(&ingredients()).await.unwrap();
        assert_eq!(outcome, QueryOutcome::default());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_graphql_errors_pass_through() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/graphql")
            .with_status(401)
            .with_body(
                r#"{"errors": [{"errorType": "UnauthorizedException", "message": "Valid authorization header not provided."}]}"#,
            )
            .create_async()
            .await;

        let backend =
            GraphqlBackend::with_endpoint(format!("{}/graphql", server.url()), None).unwrap();

        let outcome = backend.ask(&ingredients()).await.unwrap();
        assert!(outcome.data.is_none());
        assert_eq!(
            outcome.errors.unwrap()[0].message,
            "Valid authorization header not provided."
        );
    }

    #[tokio::test]
    async fn test_non_json_error_status_is_raised() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/graphql")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let backend =
            GraphqlBackend::with_endpoint(format!("{}/graphql", server.url()), None).unwrap();

        let err = backend.ask(&ingredients()).await.unwrap_err();
        assert!(err.to_string().contains("502"));
    }

    #[tokio::test]
    async fn test_auth_token_takes_precedence() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/graphql")
            .match_header("authorization", "eyJ.token")
            .match_header("x-api-key", Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"data": {"askBedrock": {"body": "ok"}}}"#)
            .create_async()
            .await;

        let config = GraphqlConfig {
            endpoint: Some(format!("{}/graphql", server.url())),
            api_key: Some("da2-test".to_string()),
            auth_token: Some("eyJ.token".to_string()),
        };
        let backend = GraphqlBackend::new(&config, Some(5)).unwrap();

        backend.ask(&ingredients()).await.unwrap();
        mock.assert_async().await;
    }

    #[test]
    fn test_provider_name() {
        let backend =
            GraphqlBackend::with_endpoint("http://localhost/graphql".to_string(), None).unwrap();
        assert_eq!(backend.backend_name(), "graphql");
    }
}
