use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::error::Error;

/// Payload returned by the recipe query.
///
/// Both fields are optional: a backend may fill `body` with the model's
/// answer, or `error` with a message it chose to report as data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// An application-level error reported alongside (or instead of) data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

/// What a backend hands back once a query settles without raising
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOutcome {
    pub data: Option<QueryResponse>,
    pub errors: Option<Vec<ApiError>>,
}

impl QueryOutcome {
    pub fn with_body(body: impl Into<String>) -> Self {
        QueryOutcome {
            data: Some(QueryResponse {
                body: Some(body.into()),
                error: None,
            }),
            errors: None,
        }
    }

    pub fn with_errors<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        QueryOutcome {
            data: None,
            errors: Some(
                messages
                    .into_iter()
                    .map(|m| ApiError { message: m.into() })
                    .collect(),
            ),
        }
    }
}

/// The query capability: forwards ingredients to a hosted model
#[async_trait]
pub trait RecipeQuery: Send + Sync {
    /// Backend name (e.g., "graphql", "anthropic")
    fn backend_name(&self) -> &str;

    /// Ask for a recipe suggestion using these ingredients
    async fn ask(
        &self,
        ingredients: &[String],
    ) -> Result<QueryOutcome, Box<dyn Error + Send + Sync>>;
}
