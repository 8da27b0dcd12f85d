use std::fmt;

use crate::controller::{RecipeController, RequestState};

pub const TITLE: &str = "AI Recipe Generator";
pub const INPUT_PLACEHOLDER: &str = "chicken, garlic, rice...";
pub const SUBMIT_LABEL: &str = "Generate Recipe";
pub const SUBMIT_LABEL_BUSY: &str = "Generating...";

/// What the form shows for a given controller state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub input: String,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
    pub error: Option<String>,
    pub result: Option<String>,
}

impl ViewModel {
    pub fn from_state(input: &str, state: &RequestState) -> Self {
        let loading = state.is_loading();
        ViewModel {
            input: input.to_string(),
            submit_label: if loading { SUBMIT_LABEL_BUSY } else { SUBMIT_LABEL },
            submit_disabled: loading,
            // Empty text renders nothing, same as no text
            error: state.error().filter(|e| !e.is_empty()),
            result: state.result().filter(|r| !r.is_empty()).map(String::from),
        }
    }

    pub fn from_controller(controller: &RecipeController) -> Self {
        Self::from_state(&controller.input(), &controller.state())
    }
}

impl fmt::Display for ViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", TITLE)?;
        let shown_input = if self.input.is_empty() {
            INPUT_PLACEHOLDER
        } else {
            self.input.as_str()
        };
        writeln!(f, "> {}", shown_input)?;
        if self.submit_disabled {
            writeln!(f, "[{}] (disabled)", self.submit_label)?;
        } else {
            writeln!(f, "[{}]", self.submit_label)?;
        }

        if let Some(error) = &self.error {
            writeln!(f)?;
            writeln!(f, "Error: {}", error)?;
        }
        if let Some(result) = &self.result {
            writeln!(f)?;
            writeln!(f, "{}", result)?;
        }
        Ok(())
    }
}
