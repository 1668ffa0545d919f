use anyhow::Result;
use tracing::{debug, warn};

use crate::db::Database;
use crate::models::RecipeRecord;

pub const HISTORY_KEY: &str = "recipeHistory";
pub const HISTORY_CAPACITY: usize = 20;

/// Recently viewed recipes, most recent first, unique by name.
pub struct HistoryStore<'a> {
    db: &'a Database,
}

impl<'a> HistoryStore<'a> {
    #[must_use]
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Move `recipe` to the top, dropping any older entry with the same name,
    /// and trim to [`HISTORY_CAPACITY`].
    ///
    /// An unreadable blob is treated as empty and replaced.
    pub fn record_visit(&self, recipe: &RecipeRecord) -> Result<()> {
        let mut history: Vec<RecipeRecord> = self
            .list()
            .into_iter()
            .filter(|r| r.name != recipe.name)
            .collect();
        history.insert(0, recipe.clone());
        history.truncate(HISTORY_CAPACITY);
        self.db.set_json_list(HISTORY_KEY, &history)?;
        debug!(name = %recipe.name, len = history.len(), "recorded visit");
        Ok(())
    }

    /// Stored order, index 0 being the most recent. Empty on read faults.
    #[must_use]
    pub fn list(&self) -> Vec<RecipeRecord> {
        self.db
            .get_json_list(HISTORY_KEY)
            .unwrap_or_else(|e| {
                warn!("could not read history: {e:#}");
                Vec::new()
            })
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<RecipeRecord> {
        self.list().into_iter().nth(index)
    }

    pub fn clear(&self) -> Result<()> {
        if self.db.delete_value(HISTORY_KEY)? {
            debug!("cleared history");
        }
        Ok(())
    }
}
