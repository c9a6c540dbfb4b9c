//! In-memory slot storage.
//!
//! # Responsibility
//! - Provide the slot contract without a database, for ephemeral stores and
//!   tests.
//! - Expose raw slot access so tests can plant corrupt values.
//!
//! # Invariants
//! - Clones share one underlying map, so a test can keep a handle to a slot
//!   while a store owns another clone.
//! - Values are the same JSON encoding the SQLite implementation writes.

use super::{decode_collection, encode_collection, SlotStorage, StorageResult};
use crate::model::task::Task;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Shared-map slot storage.
#[derive(Debug, Default, Clone)]
pub struct MemorySlotStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a raw slot value, bypassing encoding.
    ///
    /// Lets tests simulate slot corruption or content written by other
    /// software versions.
    pub fn put_raw(&self, key: &str, value: impl Into<String>) {
        self.lock().insert(key.to_string(), value.into());
    }

    /// Reads the raw slot value, if any.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still structurally intact for slot reads/writes.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SlotStorage for MemorySlotStorage {
    fn load(&self, key: &str) -> StorageResult<Option<Vec<Task>>> {
        let Some(value) = self.raw(key) else {
            return Ok(None);
        };
        Ok(Some(decode_collection(&value)?))
    }

    fn save(&mut self, key: &str, tasks: &[Task]) -> StorageResult<()> {
        let value = encode_collection(tasks)?;
        self.lock().insert(key.to_string(), value);
        Ok(())
    }
}
