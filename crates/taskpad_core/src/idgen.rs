//! Task id generation capability.
//!
//! # Responsibility
//! - Abstract id creation so stores can be driven deterministically.
//!
//! # Invariants
//! - Ids handed out by one source never repeat.
//! - Sources never return the nil UUID.

use crate::model::task::TaskId;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Capability producing fresh task ids.
pub trait IdSource {
    fn next_id(&self) -> TaskId;
}

/// Random UUIDv4 source used by production stores.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn next_id(&self) -> TaskId {
        Uuid::new_v4()
    }
}

/// Deterministic source yielding sequential ids, for tests and fixtures.
///
/// The counter starts at 1 so the nil UUID is never produced.
#[derive(Debug, Default)]
pub struct SequentialSource {
    counter: AtomicU64,
}

impl IdSource for SequentialSource {
    fn next_id(&self) -> TaskId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        Uuid::from_u128(u128::from(n))
    }
}
