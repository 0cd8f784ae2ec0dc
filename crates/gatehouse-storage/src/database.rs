//! Database connection and key/value operations

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::migrations::run_migrations;
use crate::Result;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // WAL journal
        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        run_migrations(&conn)?;

        tracing::debug!(path = %path.display(), "Opened storage database");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    /// Read a stored value, `None` when the key is absent
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM local_storage WHERE key = ?1",
                    [key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value)
        })
    }

    /// Insert or overwrite a value
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO local_storage (key, value, updated_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![key, value, updated_at],
            )?;
            Ok(())
        })
    }

    /// Remove a key. Removing an absent key is not an error.
    pub fn remove_item(&self, key: &str) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute("DELETE FROM local_storage WHERE key = ?1", [key])?;
            Ok(())
        })
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        db.with_connection(|conn| {
            let count: i32 =
                conn.query_row("SELECT COUNT(*) FROM local_storage", [], |row| row.get(0))?;
            assert_eq!(count, 0);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_item_lifecycle() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get_item("token").unwrap(), None);

        db.set_item("token", "abc").unwrap();
        assert_eq!(db.get_item("token").unwrap().as_deref(), Some("abc"));

        db.set_item("token", "def").unwrap();
        assert_eq!(db.get_item("token").unwrap().as_deref(), Some("def"));

        db.remove_item("token").unwrap();
        assert_eq!(db.get_item("token").unwrap(), None);

        // Removing twice is fine
        db.remove_item("token").unwrap();
    }

    #[test]
    fn test_clones_share_connection() {
        let db = Database::open_in_memory().unwrap();
        let other = db.clone();
        db.set_item("token", "shared").unwrap();
        assert_eq!(other.get_item("token").unwrap().as_deref(), Some("shared"));
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = std::env::temp_dir().join(format!(
            "gatehouse-storage-test-{}-{}",
            std::process::id(),
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        let path = dir.join("store.db");

        {
            let db = Database::open(&path).unwrap();
            db.set_item("token", "persisted").unwrap();
        }

        let reopened = Database::open(&path).unwrap();
        assert_eq!(
            reopened.get_item("token").unwrap().as_deref(),
            Some("persisted")
        );

        drop(reopened);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
