//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record shared by store and storage layers.
//! - Enforce the non-empty-text invariant at construction and on read-back.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `text` is trimmed and non-empty.
//! - `created_at` is unix epoch milliseconds and never changes.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every task in a collection.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Canonical task record.
///
/// Serialized field names (`id`, `text`, `completed`, `createdAt`) are the
/// slot value layout; the collection is always persisted as a whole JSON
/// array of these records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable ID used for toggle/delete addressing.
    pub id: TaskId,
    /// Display text, trimmed at construction.
    pub text: String,
    /// Completion flag, flipped only by toggle.
    pub completed: bool,
    /// Unix epoch milliseconds at creation.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

/// Validation failure for a task record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Task text is empty after trimming.
    EmptyText,
    /// Task id is the nil UUID.
    NilId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text must be non-empty"),
            Self::NilId => write!(f, "task id must not be the nil uuid"),
        }
    }
}

impl Error for TaskValidationError {}

impl Task {
    /// Creates a task with the provided stable ID and creation time.
    ///
    /// Leading/trailing whitespace in `text` is trimmed; callers reject
    /// blank input before construction, and `validate` guards the rest.
    ///
    /// # Invariants
    /// - `completed` starts as `false`.
    pub fn new(id: TaskId, text: impl Into<String>, created_at: i64) -> Self {
        Self {
            id,
            text: text.into().trim().to_string(),
            completed: false,
            created_at,
        }
    }

    /// Checks the record against model invariants.
    ///
    /// Used by storage read paths so a tampered slot cannot smuggle blank or
    /// unaddressable tasks into a store.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        Ok(())
    }

    /// Returns a copy with the completion flag flipped.
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}
