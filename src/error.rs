use thiserror::Error;

/// Errors that can occur while talking to a recipe backend
#[derive(Error, Debug)]
pub enum RecipeError {
    /// The HTTP request failed or the body could not be read
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with something we could not interpret
    #[error("Unexpected response from backend: {0}")]
    InvalidResponse(String),

    /// The backend answered with a non-success status and no usable body
    #[error("Backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// A required setting is missing from config and environment
    #[error("Missing setting: {0}")]
    MissingSetting(String),

    /// The configured backend name is not one we know about
    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    /// Error parsing HTTP headers
    #[error("Header parse error: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
