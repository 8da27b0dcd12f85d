mod anthropic;
mod factory;
mod graphql;
mod prompt;

pub use anthropic::AnthropicBackend;
pub use factory::BackendFactory;
pub use graphql::{GraphqlBackend, ASK_BEDROCK_QUERY};
pub use prompt::build_recipe_prompt;

use reqwest::Client;
use std::time::Duration;

use crate::error::RecipeError;

/// Build the HTTP client shared by the backends, with an optional timeout
pub(crate) fn http_client(timeout: Option<u64>) -> Result<Client, RecipeError> {
    let mut builder = Client::builder();
    if let Some(secs) = timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}
