//! Error types surfaced to front ends.
//!
//! Store and database code reports failures through `anyhow`; the session and
//! timer translate them into these enums, whose `Display` text is meant to be
//! shown to the user as-is.

use thiserror::Error;

/// Failures of the search → results → detail flow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Search attempted with nothing in the ingredient list
    #[error("Please add at least one ingredient.")]
    NoIngredients,

    /// Backend rejected the ingredient list (HTTP 400 with a message)
    #[error("Invalid ingredients: {0}")]
    InvalidIngredients(String),

    /// Backend answered but had nothing to offer
    #[error("No recipes found. Try different ingredients.")]
    NoRecipes,

    /// Network failure, unexpected status or unreadable body
    #[error("Failed to fetch recipes. Please try again later. ({0})")]
    Remote(String),

    #[error("Recipe '{0}' not found")]
    RecipeNotFound(String),

    #[error("No history entry #{}", .0 + 1)]
    HistoryEntryNotFound(usize),

    #[error("No favorite with id {0}")]
    FavoriteNotFound(u64),

    #[error("No recipe is open")]
    NothingSelected,

    /// Storage read/write fault while updating favorites
    #[error("Could not update favorites: {0}")]
    Persistence(String),
}

impl SessionError {
    /// Whether the ingredient list itself was refused, either locally or by
    /// the backend.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SessionError::NoIngredients | SessionError::InvalidIngredients(_)
        )
    }
}

/// Non-success answers from the recipe backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("{message}")]
    Rejected { message: String },

    #[error("recipe backend returned HTTP {status}")]
    Status { status: u16 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("Invalid time '{0}'. Enter a whole number of seconds greater than 0")]
    InvalidTime(String),

    #[error("Cannot {action} the timer while it is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}
