//! SQLite-backed slot storage.
//!
//! # Responsibility
//! - Persist serialized collections in the `slots` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Saves upsert the full value under the key in one statement.
//! - Loads validate decoded tasks before handing them to the store.

use super::{decode_collection, encode_collection, SlotStorage, StorageResult};
use crate::model::task::Task;
use rusqlite::{params, Connection};

/// Slot storage over an open, migrated SQLite connection.
pub struct SqliteSlotStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotStorage<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SlotStorage for SqliteSlotStorage<'_> {
    fn load(&self, key: &str) -> StorageResult<Option<Vec<Task>>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM slots WHERE key = ?1;")?;
        let mut rows = stmt.query([key])?;

        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let value: String = row.get(0)?;

        Ok(Some(decode_collection(&value)?))
    }

    fn save(&mut self, key: &str, tasks: &[Task]) -> StorageResult<()> {
        let value = encode_collection(tasks)?;
        self.conn.execute(
            "INSERT INTO slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}
