use anyhow::{Result, bail};
use tracing::{info, warn};

use crate::db::Database;
use crate::models::{RecipeRecord, synthesize_id};

pub const FAVORITES_KEY: &str = "@cookwise:favorites";

/// Bookmarked recipes, unique by id.
///
/// Every mutation reads the whole list, changes it and writes the whole list
/// back. A failed write leaves the previous list in place.
pub struct FavoritesStore<'a> {
    db: &'a Database,
}

impl<'a> FavoritesStore<'a> {
    #[must_use]
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// All favorites, each carrying an id. Entries stored without one get a
    /// synthesized id here; the repair is only persisted by a later write.
    pub fn list(&self) -> Result<Vec<RecipeRecord>> {
        let mut favorites: Vec<RecipeRecord> = self.db.get_json_list(FAVORITES_KEY)?;
        for recipe in &mut favorites {
            recipe.ensure_id();
        }
        Ok(favorites)
    }

    pub fn get(&self, id: u64) -> Result<Option<RecipeRecord>> {
        Ok(self.list()?.into_iter().find(|r| r.id == Some(id)))
    }

    /// Bookmark `recipe`, assigning it an id first if it has none. Adding a
    /// recipe whose id is already present succeeds without writing.
    pub fn add(&self, recipe: &mut RecipeRecord) -> Result<()> {
        let id = recipe.ensure_id();
        let mut favorites = self.list()?;
        if favorites.iter().any(|f| f.id == Some(id)) {
            return Ok(());
        }
        favorites.push(recipe.clone());
        self.db.set_json_list(FAVORITES_KEY, &favorites)?;
        info!(id, name = %recipe.name, "added favorite");
        Ok(())
    }

    /// Drop the favorite with `id`. Removing an id that is not present still
    /// rewrites the list and succeeds.
    pub fn remove(&self, id: u64) -> Result<()> {
        if id == 0 {
            bail!("Cannot remove favorite: invalid recipe id 0");
        }
        let favorites: Vec<RecipeRecord> = self
            .list()?
            .into_iter()
            .filter(|r| r.id != Some(id))
            .collect();
        self.db.set_json_list(FAVORITES_KEY, &favorites)?;
        info!(id, "removed favorite");
        Ok(())
    }

    /// Id under which `recipe` is bookmarked. Search results are numbered per
    /// search, so an id alone does not identify a recipe: the name must match
    /// too, under either the recipe's own id or the one synthesized from its
    /// name. Fails closed like [`Self::contains`].
    #[must_use]
    pub fn find(&self, recipe: &RecipeRecord) -> Option<u64> {
        let rekeyed = Some(synthesize_id(&recipe.name));
        match self.list() {
            Ok(favorites) => favorites
                .into_iter()
                .find(|f| f.name == recipe.name && (f.id == recipe.id || f.id == rekeyed))
                .and_then(|f| f.id),
            Err(e) => {
                warn!("could not read favorites: {e:#}");
                None
            }
        }
    }

    /// Membership by id. Fails closed: id 0 and read faults answer `false`.
    #[must_use]
    pub fn contains(&self, id: u64) -> bool {
        if id == 0 {
            return false;
        }
        match self.list() {
            Ok(favorites) => favorites.iter().any(|r| r.id == Some(id)),
            Err(e) => {
                warn!("could not read favorites: {e:#}");
                false
            }
        }
    }
}
