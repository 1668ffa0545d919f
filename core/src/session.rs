//! Search → results → detail flow for one user session.
//!
//! The session owns the ingredient list being composed, the last result set
//! and the currently opened recipe. Opening a recipe records a history visit;
//! toggling the favorite flag goes through the favorites store.

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::backend::{SearchQuery, recipes_from_response};
use crate::db::Database;
use crate::error::{BackendError, SessionError};
use crate::favorites::FavoritesStore;
use crate::history::HistoryStore;
use crate::models::{RecipeRecord, synthesize_id};
use crate::service::RecipeSearchProvider;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    Idle,
    Searching,
    ResultsReady(Vec<RecipeRecord>),
}

/// The opened recipe and whether it is currently shown as a favorite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub recipe: RecipeRecord,
    pub favorite: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteChange {
    Added,
    Removed,
}

impl fmt::Display for FavoriteChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FavoriteChange::Added => f.write_str("Added to favorites"),
            FavoriteChange::Removed => f.write_str("Removed from favorites"),
        }
    }
}

pub struct Session<'a> {
    favorites: FavoritesStore<'a>,
    history: HistoryStore<'a>,
    input: String,
    ingredients: Vec<String>,
    portions: Option<String>,
    state: SearchState,
    selected: Option<Selection>,
}

impl<'a> Session<'a> {
    #[must_use]
    pub fn new(db: &'a Database) -> Self {
        Self {
            favorites: FavoritesStore::new(db),
            history: HistoryStore::new(db),
            input: String::new(),
            ingredients: Vec::new(),
            portions: None,
            state: SearchState::Idle,
            selected: None,
        }
    }

    // --- Ingredient list ---

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Move the input buffer into the ingredient list. Blank input is ignored
    /// and left in the buffer.
    pub fn add_ingredient(&mut self) -> bool {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.ingredients.push(trimmed.to_string());
        self.input.clear();
        true
    }

    pub fn push_ingredient(&mut self, text: impl Into<String>) -> bool {
        self.set_input(text);
        self.add_ingredient()
    }

    /// Out-of-range indexes leave the list unchanged.
    pub fn remove_ingredient(&mut self, index: usize) {
        if index < self.ingredients.len() {
            self.ingredients.remove(index);
        }
    }

    #[must_use]
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Blank text clears the portions parameter.
    pub fn set_portions(&mut self, text: &str) {
        let trimmed = text.trim();
        self.portions = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    #[must_use]
    pub fn portions(&self) -> Option<&str> {
        self.portions.as_deref()
    }

    // --- Search ---

    #[must_use]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    #[must_use]
    pub fn results(&self) -> &[RecipeRecord] {
        match &self.state {
            SearchState::ResultsReady(results) => results,
            _ => &[],
        }
    }

    /// Run a search for the current ingredient list.
    ///
    /// Every failure leaves the session `Idle` with no results; the ingredient
    /// list is kept so the user can adjust it and retry.
    pub fn search(
        &mut self,
        provider: &dyn RecipeSearchProvider,
    ) -> Result<&[RecipeRecord], SessionError> {
        if self.ingredients.is_empty() {
            return Err(SessionError::NoIngredients);
        }

        let query = SearchQuery {
            ingredients: self.ingredients.clone(),
            portions: self.portions.clone(),
        };
        self.selected = None;
        self.state = SearchState::Searching;
        debug!(ingredients = %query.ingredients_param(), portions = ?query.portions, "searching recipes");

        let response = match provider.search(&query) {
            Ok(response) => response,
            Err(e) => {
                self.state = SearchState::Idle;
                warn!("recipe search failed: {e:#}");
                return Err(match e.downcast_ref::<BackendError>() {
                    Some(BackendError::Rejected { message }) => {
                        SessionError::InvalidIngredients(message.clone())
                    }
                    _ => SessionError::Remote(format!("{e:#}")),
                });
            }
        };

        let records = recipes_from_response(response);
        if records.is_empty() {
            self.state = SearchState::Idle;
            return Err(SessionError::NoRecipes);
        }

        self.state = SearchState::ResultsReady(records);
        Ok(self.results())
    }

    // --- Selection ---

    #[must_use]
    pub fn selected(&self) -> Option<&Selection> {
        self.selected.as_ref()
    }

    /// Open a recipe from the current result set by name.
    pub fn select_recipe(&mut self, name: &str) -> Result<&Selection, SessionError> {
        let recipe = self
            .results()
            .iter()
            .find(|r| r.name == name)
            .cloned()
            .ok_or_else(|| SessionError::RecipeNotFound(name.to_string()))?;
        Ok(self.open(recipe))
    }

    /// Reopen the history entry at `index` (0 = most recent).
    pub fn open_from_history(&mut self, index: usize) -> Result<&Selection, SessionError> {
        let recipe = self
            .history
            .get(index)
            .ok_or(SessionError::HistoryEntryNotFound(index))?;
        Ok(self.open(recipe))
    }

    /// Open a bookmarked recipe. Favorites are not recorded as visits.
    pub fn open_favorite(&mut self, id: u64) -> Result<&Selection, SessionError> {
        let recipe = self
            .favorites
            .get(id)
            .map_err(|e| SessionError::Persistence(format!("{e:#}")))?
            .ok_or(SessionError::FavoriteNotFound(id))?;
        Ok(&*self.selected.insert(Selection {
            recipe,
            favorite: true,
        }))
    }

    fn open(&mut self, recipe: RecipeRecord) -> &Selection {
        if let Err(e) = self.history.record_visit(&recipe) {
            warn!(name = %recipe.name, "could not save history: {e:#}");
        }
        let favorite = self.favorites.find(&recipe).is_some();
        self.selected.insert(Selection { recipe, favorite })
    }

    /// Close the opened recipe, keeping the result set.
    pub fn back(&mut self) {
        self.selected = None;
    }

    /// Flip the favorite flag of the opened recipe. On failure the displayed
    /// flag is left as it was.
    pub fn toggle_favorite(&mut self) -> Result<FavoriteChange, SessionError> {
        let selection = self.selected.as_mut().ok_or(SessionError::NothingSelected)?;

        let change = match self.favorites.find(&selection.recipe) {
            Some(id) => self.favorites.remove(id).map(|()| FavoriteChange::Removed),
            None => {
                let id = selection.recipe.ensure_id();
                if self.favorites.contains(id) {
                    // The id belongs to a different recipe from an earlier search
                    let rekeyed = synthesize_id(&selection.recipe.name);
                    debug!(id, rekeyed, name = %selection.recipe.name, "re-keying favorite");
                    selection.recipe.id = Some(rekeyed);
                }
                self.favorites
                    .add(&mut selection.recipe)
                    .map(|()| FavoriteChange::Added)
            }
        };

        match change {
            Ok(change) => {
                selection.favorite = change == FavoriteChange::Added;
                Ok(change)
            }
            Err(e) => {
                warn!(name = %selection.recipe.name, "favorite toggle failed: {e:#}");
                Err(SessionError::Persistence(format!("{e:#}")))
            }
        }
    }
}
