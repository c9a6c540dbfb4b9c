//! Core domain logic for Taskpad.
//! This crate is the single source of truth for business invariants.

pub mod clock;
pub mod db;
pub mod idgen;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use idgen::{IdSource, SequentialSource, UuidSource};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use storage::{
    memory::MemorySlotStorage, sqlite::SqliteSlotStorage, SlotStorage, StorageError, StorageResult,
};
pub use store::todo_store::{
    FilterKind, Sections, StoreConfig, TaskCounts, TodoStore, DEFAULT_SLOT_KEY,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
