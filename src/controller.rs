//! Request lifecycle for the recipe form.
//!
//! A [`RecipeController`] owns the input text and a [`RequestState`], and
//! drives one query per submission:
//!
//! ```text
//! Idle --submit--> Loading --settle--> Succeeded | Failed
//! Succeeded | Failed --submit--> Loading
//! ```
//!
//! `submit` does not exclude overlapping calls. When two submissions overlap,
//! whichever query settles last decides the final state, regardless of which
//! was issued last. Use [`RecipeController::try_submit`] to reject a
//! submission while another is in flight.

use log::{debug, info, warn};
use std::error::Error as StdError;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

use crate::ingredients::IngredientList;
use crate::query::{QueryOutcome, RecipeQuery};

/// Shown when the model answered with neither a body nor an error
pub const NO_MODEL_RESPONSE: &str = "No response from model.";

/// Why a request ended in [`RequestState::Failed`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The query itself raised
    #[error("{0}")]
    Transport(String),

    /// The query settled with one or more application errors
    #[error("{}", .0.join(", "))]
    Application(Vec<String>),

    /// The query settled with neither data nor errors
    #[error("No data returned from API.")]
    EmptyResponse,
}

/// State of the form's single request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Succeeded(String),
    Failed(Failure),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    /// Result text, if the last request succeeded
    pub fn result(&self) -> Option<&str> {
        match self {
            RequestState::Succeeded(text) => Some(text),
            _ => None,
        }
    }

    /// Why the last request failed, if it did
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            RequestState::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Error text, if the last request failed.
    ///
    /// Owned, unlike [`result`](Self::result): the text of an error-list
    /// failure is joined from its messages when asked for.
    pub fn error(&self) -> Option<String> {
        match self {
            RequestState::Failed(failure) => Some(failure.to_string()),
            _ => None,
        }
    }
}

/// Turn a settled query into the state the form should show.
///
/// Precedence: a raised error, then a non-empty error list, then data
/// (`body`, falling back to `error`, then [`NO_MODEL_RESPONSE`]), and finally
/// [`Failure::EmptyResponse`] when nothing came back at all.
pub fn resolve(outcome: Result<QueryOutcome, Box<dyn StdError + Send + Sync>>) -> RequestState {
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => return RequestState::Failed(Failure::Transport(e.to_string())),
    };

    if let Some(errors) = outcome.errors.filter(|errors| !errors.is_empty()) {
        return RequestState::Failed(Failure::Application(
            errors.into_iter().map(|e| e.message).collect(),
        ));
    }

    match outcome.data {
        Some(data) => {
            let text = data
                .body
                .filter(|body| !body.is_empty())
                .or_else(|| data.error.filter(|error| !error.is_empty()))
                .unwrap_or_else(|| NO_MODEL_RESPONSE.to_string());
            RequestState::Succeeded(text)
        }
        None => RequestState::Failed(Failure::EmptyResponse),
    }
}

/// Returned by [`RecipeController::try_submit`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("A request is already in flight")]
    InFlight,
}

#[derive(Debug, Default)]
struct FormState {
    input: String,
    state: RequestState,
}

/// Owns the form input and request state, and talks to a [`RecipeQuery`]
pub struct RecipeController {
    query: Box<dyn RecipeQuery>,
    form: Mutex<FormState>,
}

impl RecipeController {
    pub fn new(query: Box<dyn RecipeQuery>) -> Self {
        RecipeController {
            query,
            form: Mutex::new(FormState::default()),
        }
    }

    pub fn backend_name(&self) -> &str {
        self.query.backend_name()
    }

    pub fn set_input(&self, input: impl Into<String>) {
        self.lock().input = input.into();
    }

    pub fn input(&self) -> String {
        self.lock().input.clone()
    }

    pub fn state(&self) -> RequestState {
        self.lock().state.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().state.is_loading()
    }

    /// Submit the current input and wait for the query to settle.
    ///
    /// Returns the state written by this submission's settlement. A later
    /// settlement from an overlapping submission may replace it.
    pub async fn submit(&self) -> RequestState {
        let ingredients = {
            let mut form = self.lock();
            form.state = RequestState::Loading;
            IngredientList::parse(&form.input)
        };
        self.run(ingredients).await
    }

    /// Like [`submit`](Self::submit), but refuses to start while a request is
    /// in flight.
    pub async fn try_submit(&self) -> Result<RequestState, SubmitError> {
        let ingredients = {
            let mut form = self.lock();
            if form.state.is_loading() {
                warn!("Rejected submission while a request is in flight");
                return Err(SubmitError::InFlight);
            }
            form.state = RequestState::Loading;
            IngredientList::parse(&form.input)
        };
        Ok(self.run(ingredients).await)
    }

    async fn run(&self, ingredients: IngredientList) -> RequestState {
        debug!(
            "Asking {} for a recipe with {:?}",
            self.query.backend_name(),
            &*ingredients
        );

        let outcome = self.query.ask(&ingredients).await;
        let next = resolve(outcome);

        match &next {
            RequestState::Succeeded(_) => info!("Recipe request succeeded"),
            RequestState::Failed(failure) => warn!("Recipe request failed: {}", failure),
            _ => {}
        }

        self.lock().state = next.clone();
        next
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        // State is replaced wholesale, so a poisoned lock still holds a valid value
        self.form.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
