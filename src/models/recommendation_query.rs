use super::breeds::{filter_suggestions, BOVINE_BREEDS};
use super::{Recommendation, SubmitStatus};
use crate::error::WorkflowError;

pub const MISSING_BREED_MESSAGE: &str = "Please enter a bovine breed.";

/// State of the nutrition lookup screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationQuery {
    input: String,
    suggestions: Vec<&'static str>,
    status: SubmitStatus,
    /// Breed the current `recommendations` were fetched for. Set together with them.
    displayed: Option<(String, Vec<Recommendation>)>,
    error: Option<String>,
}

impl RecommendationQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every keystroke replaces the input and recomputes the suggestions.
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
        self.suggestions = filter_suggestions(&self.input, BOVINE_BREEDS);
    }

    /// Fills the input from a suggestion without submitting.
    pub fn select_suggestion(&mut self, breed: &str) {
        self.input = breed.to_string();
        self.suggestions.clear();
    }

    /// Moves to `Pending` and returns the breed to ask about.
    pub fn begin(&mut self) -> Result<String, WorkflowError> {
        if self.status == SubmitStatus::Pending {
            return Err(WorkflowError::Busy);
        }

        if self.input.trim().is_empty() {
            self.error = Some(MISSING_BREED_MESSAGE.to_string());
            return Err(WorkflowError::MissingInput(MISSING_BREED_MESSAGE));
        }

        self.status = SubmitStatus::Pending;
        self.error = None;
        self.displayed = None;
        self.suggestions.clear();
        Ok(self.input.clone())
    }

    pub fn succeed(&mut self, breed: String, recommendations: Vec<Recommendation>) {
        self.status = SubmitStatus::Success;
        self.error = None;
        self.displayed = Some((breed, recommendations));
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = SubmitStatus::Error;
        self.displayed = None;
        self.error = Some(message.into());
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &[&'static str] {
        &self.suggestions
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn last_submitted_breed(&self) -> Option<&str> {
        self.displayed.as_ref().map(|(breed, _)| breed.as_str())
    }

    pub fn recommendations(&self) -> Option<&[Recommendation]> {
        self.displayed.as_ref().map(|(_, recs)| recs.as_slice())
    }

    /// Heading for the rendered list, tied to the breed that was submitted.
    pub fn heading(&self) -> Option<String> {
        self.last_submitted_breed()
            .map(|breed| format!("For the {} breed", breed))
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
