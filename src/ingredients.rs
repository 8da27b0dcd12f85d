use serde::Serialize;
use std::ops::Deref;

/// Ordered list of ingredient names parsed from free text.
///
/// Never contains empty or whitespace-only entries. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IngredientList(Vec<String>);

impl IngredientList {
    /// Parse a comma-separated ingredient string.
    ///
    /// Each piece is trimmed and empty pieces are dropped, so `" a, b ,,c,"`
    /// yields `["a", "b", "c"]`. This never fails.
    pub fn parse(input: &str) -> Self {
        IngredientList(
            input
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl Deref for IngredientList {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

/// Shorthand for [`IngredientList::parse`].
pub fn parse_ingredients(input: &str) -> IngredientList {
    IngredientList::parse(input)
}
