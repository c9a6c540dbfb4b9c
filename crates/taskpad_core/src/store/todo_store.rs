//! Todo store: collection state transitions and slot synchronization.
//!
//! # Responsibility
//! - Own the ordered task collection, the pending-input text and the filter
//!   selection.
//! - Apply add/toggle/remove/clear transitions by whole-collection
//!   replacement.
//! - Mirror every mutation into the configured slot.
//!
//! # Invariants
//! - Task ids are unique within the collection.
//! - New tasks are prepended; the relative order of existing tasks never
//!   changes.
//! - No operation returns an error; storage failures degrade to log events.

use crate::clock::{Clock, SystemClock};
use crate::idgen::{IdSource, UuidSource};
use crate::model::task::{Task, TaskId};
use crate::storage::SlotStorage;
use log::{debug, info, warn};

/// Fixed slot key used by stores that do not override it.
pub const DEFAULT_SLOT_KEY: &str = "taskpad.todos";

/// Read-side filter over the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterKind {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterKind {
    /// Parses the user-facing selector names (`all|active|completed`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

/// Feature configuration selecting the store's optional behaviors.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Slot key for persistence; `None` keeps the store memory-only.
    pub slot_key: Option<String>,
    /// Whether the filter selector surface is enabled.
    pub filtering: bool,
    /// Whether the view splits active and completed sections.
    pub collapse_completed: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            slot_key: None,
            filtering: true,
            collapse_completed: false,
        }
    }
}

impl StoreConfig {
    /// Configuration with persistence enabled under the default slot key.
    pub fn persistent() -> Self {
        Self {
            slot_key: Some(DEFAULT_SLOT_KEY.to_string()),
            ..Self::default()
        }
    }
}

/// Badge counters derived from the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCounts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

/// Active/completed partition for the collapsible-completed view variant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sections {
    pub active: Vec<Task>,
    pub completed: Vec<Task>,
}

/// Todo collection store with injected persistence, id and time sources.
///
/// Mutations never fail: blank input and unknown ids are no-ops, and slot
/// write failures are logged without surfacing to the caller.
pub struct TodoStore<S, I, C> {
    config: StoreConfig,
    storage: S,
    ids: I,
    clock: C,
    tasks: Vec<Task>,
    input: String,
    active_filter: FilterKind,
}

impl<S: SlotStorage> TodoStore<S, UuidSource, SystemClock> {
    /// Creates a store with the production id and time sources.
    pub fn with_system_sources(config: StoreConfig, storage: S) -> Self {
        Self::new(config, storage, UuidSource, SystemClock)
    }
}

impl<S: SlotStorage, I: IdSource, C: Clock> TodoStore<S, I, C> {
    /// Creates a store, loading the configured slot when persistence is on.
    ///
    /// An absent slot starts empty. A malformed or unreadable slot also
    /// starts empty; the failure is reported through the log, never to the
    /// caller.
    pub fn new(config: StoreConfig, storage: S, ids: I, clock: C) -> Self {
        let tasks = match config.slot_key.as_deref() {
            Some(key) => load_or_empty(&storage, key),
            None => Vec::new(),
        };
        info!(
            "event=store_init module=store status=ok persistent={} tasks={}",
            config.slot_key.is_some(),
            tasks.len()
        );

        Self {
            config,
            storage,
            ids,
            clock,
            tasks,
            input: String::new(),
            active_filter: FilterKind::All,
        }
    }

    /// Pending-input text.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Adds a task from `raw` text.
    ///
    /// Blank input (empty after trimming) is rejected without touching any
    /// state. On success the new task is prepended, the pending input is
    /// cleared and the collection is persisted.
    pub fn add(&mut self, raw: &str) -> Option<TaskId> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        let task = Task::new(self.ids.next_id(), text, self.clock.now_epoch_ms());
        let id = task.id;

        let mut next = Vec::with_capacity(self.tasks.len() + 1);
        next.push(task);
        next.extend(self.tasks.iter().cloned());
        self.replace(next);

        self.input.clear();
        Some(id)
    }

    /// Adds a task from the pending-input text (the submit/Enter path).
    pub fn submit(&mut self) -> Option<TaskId> {
        let raw = self.input.clone();
        self.add(&raw)
    }

    /// Flips the completion flag of the matching task.
    ///
    /// Unknown ids are a no-op, not an error: ids are only ever sourced from
    /// the currently rendered collection.
    pub fn toggle(&mut self, id: TaskId) -> bool {
        if !self.tasks.iter().any(|task| task.id == id) {
            return false;
        }

        let next = self
            .tasks
            .iter()
            .map(|task| {
                if task.id == id {
                    task.toggled()
                } else {
                    task.clone()
                }
            })
            .collect();
        self.replace(next);
        true
    }

    /// Removes the matching task; unknown ids are a no-op.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let next: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| task.id != id)
            .cloned()
            .collect();
        if next.len() == self.tasks.len() {
            return false;
        }

        self.replace(next);
        true
    }

    /// Removes every completed task in one replacement.
    ///
    /// Returns the number of removed tasks; zero means no state change and
    /// no slot write.
    pub fn clear_completed(&mut self) -> usize {
        let next: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| !task.completed)
            .cloned()
            .collect();
        let removed = self.tasks.len() - next.len();
        if removed > 0 {
            self.replace(next);
        }
        removed
    }

    /// Full collection snapshot, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Pure read-side derivation; the collection itself is untouched.
    pub fn filter(&self, kind: FilterKind) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| kind.matches(task))
            .cloned()
            .collect()
    }

    /// Selects the active filter. Ignored when filtering is disabled.
    pub fn set_filter(&mut self, kind: FilterKind) {
        if self.config.filtering {
            self.active_filter = kind;
        }
    }

    pub fn active_filter(&self) -> FilterKind {
        self.active_filter
    }

    /// Collection as currently filtered.
    pub fn visible(&self) -> Vec<Task> {
        self.filter(self.active_filter)
    }

    /// Active/completed partition for the collapsible-completed variant.
    pub fn sections(&self) -> Sections {
        let (completed, active) = self
            .tasks
            .iter()
            .cloned()
            .partition(|task| task.completed);
        Sections { active, completed }
    }

    /// Badge counters for header/footer display.
    pub fn counts(&self) -> TaskCounts {
        let completed = self.tasks.iter().filter(|task| task.completed).count();
        TaskCounts {
            total: self.tasks.len(),
            active: self.tasks.len() - completed,
            completed,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn replace(&mut self, next: Vec<Task>) {
        self.tasks = next;
        self.persist();
    }

    fn persist(&mut self) {
        let Some(key) = self.config.slot_key.as_deref() else {
            return;
        };
        match self.storage.save(key, &self.tasks) {
            Ok(()) => debug!(
                "event=slot_save module=store status=ok key={key} tasks={}",
                self.tasks.len()
            ),
            Err(err) => warn!(
                "event=slot_save module=store status=error key={key} error_code={} error={err}",
                err.code()
            ),
        }
    }
}

fn load_or_empty<S: SlotStorage>(storage: &S, key: &str) -> Vec<Task> {
    match storage.load(key) {
        Ok(Some(tasks)) => {
            info!(
                "event=slot_load module=store status=ok key={key} tasks={}",
                tasks.len()
            );
            tasks
        }
        Ok(None) => {
            info!("event=slot_load module=store status=ok key={key} tasks=0");
            Vec::new()
        }
        Err(err) => {
            warn!(
                "event=slot_load module=store status=recovered key={key} error_code={} error={err}",
                err.code()
            );
            Vec::new()
        }
    }
}
