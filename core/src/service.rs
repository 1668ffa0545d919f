use std::path::Path;

use anyhow::Result;

use crate::backend::{SearchQuery, SearchResponse};
use crate::db::Database;
use crate::favorites::FavoritesStore;
use crate::history::HistoryStore;
use crate::session::Session;

const DARK_MODE_SETTING: &str = "dark_mode";

/// Platform-native recipe search provider.
///
/// The CLI implements this with reqwest. Called synchronously from the
/// session; async callers must run it where blocking is allowed.
pub trait RecipeSearchProvider: Send + Sync {
    fn search(&self, query: &SearchQuery) -> Result<SearchResponse>;
}

/// Entry point for front ends: owns the database and hands out stores and
/// sessions borrowing it.
pub struct CookwiseService {
    db: Database,
}

impl CookwiseService {
    pub fn new(db_path: &Path) -> Result<Self> {
        let db = Database::open(db_path)?;
        Ok(Self { db })
    }

    pub fn new_in_memory() -> Result<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self { db })
    }

    #[must_use]
    pub fn favorites(&self) -> FavoritesStore<'_> {
        FavoritesStore::new(&self.db)
    }

    #[must_use]
    pub fn history(&self) -> HistoryStore<'_> {
        HistoryStore::new(&self.db)
    }

    #[must_use]
    pub fn session(&self) -> Session<'_> {
        Session::new(&self.db)
    }

    // --- Settings ---

    pub fn dark_mode(&self) -> Result<bool> {
        Ok(self.db.get_setting(DARK_MODE_SETTING)?.as_deref() == Some("true"))
    }

    pub fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        self.db
            .set_setting(DARK_MODE_SETTING, if enabled { "true" } else { "false" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecipeRecord;

    #[test]
    fn test_dark_mode_defaults_off() {
        let svc = CookwiseService::new_in_memory().unwrap();
        assert!(!svc.dark_mode().unwrap());

        svc.set_dark_mode(true).unwrap();
        assert!(svc.dark_mode().unwrap());

        svc.set_dark_mode(false).unwrap();
        assert!(!svc.dark_mode().unwrap());
    }

    #[test]
    fn test_stores_are_independent() {
        let svc = CookwiseService::new_in_memory().unwrap();
        let mut r = RecipeRecord::new("Risotto");
        r.id = Some(3);

        svc.favorites().add(&mut r).unwrap();
        svc.history().record_visit(&r).unwrap();
        svc.history().clear().unwrap();

        // Clearing history leaves the favorite alone
        assert!(svc.favorites().contains(3));
        assert!(svc.history().list().is_empty());
    }

    #[test]
    fn test_file_backed_service() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookwise.db");
        {
            let svc = CookwiseService::new(&path).unwrap();
            svc.history()
                .record_visit(&RecipeRecord::new("Gumbo"))
                .unwrap();
        }
        let svc = CookwiseService::new(&path).unwrap();
        assert_eq!(svc.history().list()[0].name, "Gumbo");
    }
}
