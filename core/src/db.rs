use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

const SETTING_PREFIX: &str = "setting:";

/// Flat key/value storage. Each value is an opaque string; list blobs are
/// JSON arrays replaced wholesale on every write.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        let version: i64 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS kv_store (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );

                PRAGMA user_version = 1;",
            )?;
        }

        Ok(())
    }

    // --- Raw values ---

    pub fn set_value(&self, key: &str, value: &str) -> Result<()> {
        let now = Local::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, now],
            )
            .with_context(|| format!("Failed to write '{key}'"))?;
        Ok(())
    }

    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read '{key}'"))
    }

    pub fn delete_value(&self, key: &str) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(rows > 0)
    }

    // --- JSON list blobs ---

    /// Read a JSON array stored under `key`; a missing key is an empty list.
    pub fn get_json_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.get_value(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("Stored value for '{key}' is not a valid list")),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the whole list stored under `key`.
    pub fn set_json_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let raw = serde_json::to_string(items)?;
        self.set_value(key, &raw)
    }

    // --- User settings ---

    pub fn set_setting(&self, name: &str, value: &str) -> Result<()> {
        self.set_value(&format!("{SETTING_PREFIX}{name}"), value)
    }

    pub fn get_setting(&self, name: &str) -> Result<Option<String>> {
        self.get_value(&format!("{SETTING_PREFIX}{name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecipeRecord;

    #[test]
    fn test_value_roundtrip_and_overwrite() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_value("k").unwrap().is_none());

        db.set_value("k", "one").unwrap();
        assert_eq!(db.get_value("k").unwrap().as_deref(), Some("one"));

        db.set_value("k", "two").unwrap();
        assert_eq!(db.get_value("k").unwrap().as_deref(), Some("two"));

        assert!(db.delete_value("k").unwrap());
        assert!(!db.delete_value("k").unwrap());
    }

    #[test]
    fn test_json_list_missing_is_empty() {
        let db = Database::open_in_memory().unwrap();
        let items: Vec<RecipeRecord> = db.get_json_list("nothing").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_json_list_corrupt_is_error() {
        let db = Database::open_in_memory().unwrap();
        db.set_value("broken", "{not json").unwrap();
        let result: Result<Vec<RecipeRecord>> = db.get_json_list("broken");
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_are_namespaced() {
        let db = Database::open_in_memory().unwrap();
        db.set_setting("dark_mode", "true").unwrap();
        assert_eq!(db.get_setting("dark_mode").unwrap().as_deref(), Some("true"));
        assert!(db.get_value("dark_mode").unwrap().is_none());
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookwise.db");
        {
            let db = Database::open(&path).unwrap();
            db.set_json_list("list", &[RecipeRecord::new("Soup")])
                .unwrap();
        }
        let db = Database::open(&path).unwrap();
        let items: Vec<RecipeRecord> = db.get_json_list("list").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Soup");
    }
}
