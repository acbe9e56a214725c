//! Key/value blob storage backing the store persistence port.

use rusqlite::OptionalExtension;

use super::{Database, DbResult};
use crate::store::{PersistError, PersistResult, StatePersistence};

impl Database {
    /// Read a state blob.
    pub fn get_state(&self, key: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row("SELECT value FROM app_state WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(Into::into)
    }

    /// Write a state blob, replacing any previous value.
    pub fn put_state(&self, key: &str, value: &str) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO app_state (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            [key, value],
        )?;
        Ok(())
    }

    pub fn delete_state(&self, key: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM app_state WHERE key = ?", [key])?;
        Ok(rows_affected > 0)
    }
}

impl StatePersistence for Database {
    fn read(&self, key: &str) -> PersistResult<Option<String>> {
        self.get_state(key)
            .map_err(|e| PersistError::Backend(e.to_string()))
    }

    fn write(&self, key: &str, blob: &str) -> PersistResult<()> {
        self.put_state(key, blob)
            .map_err(|e| PersistError::Backend(e.to_string()))
    }

    fn remove(&self, key: &str) -> PersistResult<bool> {
        self.delete_state(key)
            .map_err(|e| PersistError::Backend(e.to_string()))
    }
}
