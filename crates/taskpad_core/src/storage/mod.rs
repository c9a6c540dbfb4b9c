//! Slot persistence contracts and implementations.
//!
//! # Responsibility
//! - Define the key-value slot contract used by the todo store.
//! - Isolate SQLite and serialization details from store orchestration.
//!
//! # Invariants
//! - A slot holds one whole serialized collection; writes are full
//!   overwrites, never merges.
//! - Read paths report malformed persisted state as typed errors instead of
//!   masking it; the store decides how to degrade.

pub mod memory;
pub mod sqlite;

use crate::db::DbError;
use crate::model::task::{Task, TaskValidationError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StorageResult<T> = Result<T, StorageError>;

/// Slot persistence and decoding error.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Malformed(String),
    Validation(TaskValidationError),
}

impl StorageError {
    /// Stable error code for structured log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Db(_) => "slot_db_failed",
            Self::Malformed(_) => "slot_malformed",
            Self::Validation(_) => "slot_task_invalid",
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Malformed(message) => write!(f, "malformed slot value: {message}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Malformed(_) => None,
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<TaskValidationError> for StorageError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Key-value slot contract for persisting whole task collections.
///
/// `load` returns `Ok(None)` for an absent slot so callers can distinguish
/// "never written" from "written but corrupt".
pub trait SlotStorage {
    fn load(&self, key: &str) -> StorageResult<Option<Vec<Task>>>;
    fn save(&mut self, key: &str, tasks: &[Task]) -> StorageResult<()>;
}

/// Serializes a collection into the canonical slot value.
pub(crate) fn encode_collection(tasks: &[Task]) -> StorageResult<String> {
    serde_json::to_string(tasks).map_err(|err| StorageError::Malformed(err.to_string()))
}

/// Decodes and validates a slot value back into a collection.
///
/// Rejects blank tasks and duplicate ids so store invariants hold even for
/// slot content written by other software versions or tampered by hand.
pub(crate) fn decode_collection(value: &str) -> StorageResult<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_str(value).map_err(|err| {
        StorageError::Malformed(format!("slot value is not a task collection: {err}"))
    })?;

    let mut seen = HashSet::new();
    for task in &tasks {
        task.validate()?;
        if !seen.insert(task.id) {
            return Err(StorageError::Malformed(format!(
                "duplicate task id `{}` in slot value",
                task.id
            )));
        }
    }

    Ok(tasks)
}
