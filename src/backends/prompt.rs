/// Build the user prompt asking the model for a recipe idea.
///
/// Ingredients are joined with `", "` in the order given.
pub fn build_recipe_prompt(ingredients: &[String]) -> String {
    format!(
        "Suggest a recipe idea using these ingredients: {}.",
        ingredients.join(", ")
    )
}
