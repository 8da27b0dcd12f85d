pub mod backends;
pub mod config;
pub mod controller;
pub mod error;
pub mod ingredients;
pub mod query;
pub mod view;

// Re-export main types
pub use backends::BackendFactory;
pub use config::AppConfig;
pub use controller::{resolve, Failure, RecipeController, RequestState, SubmitError};
pub use error::RecipeError;
pub use ingredients::{parse_ingredients, IngredientList};
pub use query::{ApiError, QueryOutcome, QueryResponse, RecipeQuery};
pub use view::ViewModel;

/// Build a controller for the backend named in configuration
pub fn controller_from_config(config: &AppConfig) -> Result<RecipeController, RecipeError> {
    let backend = BackendFactory::from_config(config)?;
    Ok(RecipeController::new(backend))
}

/// Generate a recipe suggestion from a comma-separated ingredient string
///
/// Loads configuration from `config.toml` and `RECIPE__*` environment
/// variables, submits once and returns the settled state.
///
/// # Example
/// ```no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let state = ai_recipe_generator::generate_recipe("chicken, garlic, rice").await?;
/// if let Some(recipe) = state.result() {
///     println!("{}", recipe);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn generate_recipe(ingredients: &str) -> Result<RequestState, RecipeError> {
    let config = AppConfig::load()?;
    let controller = controller_from_config(&config)?;
    controller.set_input(ingredients);
    Ok(controller.submit().await)
}
