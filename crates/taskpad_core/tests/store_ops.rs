use std::collections::HashSet;
use taskpad_core::{
    FilterKind, FixedClock, MemorySlotStorage, SequentialSource, StoreConfig, TaskId, TodoStore,
};

const NOW_MS: i64 = 1_700_000_000_000;

fn ephemeral_store() -> TodoStore<MemorySlotStorage, SequentialSource, FixedClock> {
    TodoStore::new(
        StoreConfig::default(),
        MemorySlotStorage::new(),
        SequentialSource::default(),
        FixedClock(NOW_MS),
    )
}

#[test]
fn add_prepends_and_assigns_unique_ids() {
    let mut store = ephemeral_store();

    store.add("first").unwrap();
    store.add("second").unwrap();
    store.add("third").unwrap();

    let texts: Vec<&str> = store.tasks().iter().map(|task| task.text.as_str()).collect();
    assert_eq!(texts, vec!["third", "second", "first"]);

    let ids: HashSet<TaskId> = store.tasks().iter().map(|task| task.id).collect();
    assert_eq!(ids.len(), 3);
    assert!(store.tasks().iter().all(|task| !task.completed));
    assert!(store.tasks().iter().all(|task| task.created_at == NOW_MS));
}

#[test]
fn blank_adds_never_change_the_collection() {
    let mut store = ephemeral_store();

    assert_eq!(store.add(""), None);
    assert_eq!(store.add("   "), None);
    assert_eq!(store.add("\t\n"), None);
    assert!(store.tasks().is_empty());
}

#[test]
fn submit_consumes_and_clears_pending_input() {
    let mut store = ephemeral_store();

    store.set_input("  Buy milk  ");
    let id = store.submit().unwrap();

    assert_eq!(store.input(), "");
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].id, id);
    assert_eq!(store.tasks()[0].text, "Buy milk");

    // A blank submission is a no-op and keeps the pending text around.
    store.set_input("   ");
    assert_eq!(store.submit(), None);
    assert_eq!(store.input(), "   ");
    assert_eq!(store.tasks().len(), 1);
}

#[test]
fn toggle_twice_restores_the_original_state() {
    let mut store = ephemeral_store();
    let id = store.add("flip me").unwrap();
    let before = store.tasks().to_vec();

    assert!(store.toggle(id));
    assert!(store.tasks()[0].completed);

    assert!(store.toggle(id));
    assert_eq!(store.tasks(), before.as_slice());
}

#[test]
fn toggle_preserves_positions_of_other_tasks() {
    let mut store = ephemeral_store();
    store.add("a").unwrap();
    let middle = store.add("b").unwrap();
    store.add("c").unwrap();

    store.toggle(middle);

    let texts: Vec<&str> = store.tasks().iter().map(|task| task.text.as_str()).collect();
    assert_eq!(texts, vec!["c", "b", "a"]);
    assert!(store.tasks()[1].completed);
    assert!(!store.tasks()[0].completed);
    assert!(!store.tasks()[2].completed);
}

#[test]
fn toggle_unknown_id_is_a_noop() {
    let mut store = ephemeral_store();
    store.add("only task").unwrap();
    let before = store.tasks().to_vec();

    assert!(!store.toggle(TaskId::from_u128(0xdead)));
    assert_eq!(store.tasks(), before.as_slice());
}

#[test]
fn remove_is_a_noop_the_second_time_and_keeps_order() {
    let mut store = ephemeral_store();
    store.add("a").unwrap();
    let doomed = store.add("b").unwrap();
    store.add("c").unwrap();

    assert!(store.remove(doomed));
    assert!(!store.remove(doomed));

    let texts: Vec<&str> = store.tasks().iter().map(|task| task.text.as_str()).collect();
    assert_eq!(texts, vec!["c", "a"]);
    assert!(store.tasks().iter().all(|task| task.id != doomed));
}

#[test]
fn clear_completed_removes_all_done_tasks_at_once() {
    let mut store = ephemeral_store();
    let done_a = store.add("done a").unwrap();
    store.add("keep").unwrap();
    let done_b = store.add("done b").unwrap();
    store.toggle(done_a);
    store.toggle(done_b);

    assert_eq!(store.clear_completed(), 2);
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].text, "keep");

    assert_eq!(store.clear_completed(), 0);
}

#[test]
fn active_and_completed_filters_partition_the_collection() {
    let mut store = ephemeral_store();
    for n in 0..6 {
        let id = store.add(format!("task {n}").as_str()).unwrap();
        if n % 2 == 0 {
            store.toggle(id);
        }
    }

    let all: HashSet<TaskId> = store.tasks().iter().map(|task| task.id).collect();
    let active: HashSet<TaskId> = store
        .filter(FilterKind::Active)
        .iter()
        .map(|task| task.id)
        .collect();
    let completed: HashSet<TaskId> = store
        .filter(FilterKind::Completed)
        .iter()
        .map(|task| task.id)
        .collect();

    assert!(active.is_disjoint(&completed));
    let union: HashSet<TaskId> = active.union(&completed).copied().collect();
    assert_eq!(union, all);

    // Filtering is a pure derivation and preserves relative order.
    assert_eq!(store.tasks().len(), 6);
    let active_rows = store.filter(FilterKind::Active);
    let active_texts: Vec<&str> = active_rows.iter().map(|task| task.text.as_str()).collect();
    assert_eq!(active_texts, vec!["task 5", "task 3", "task 1"]);
}

#[test]
fn filter_selection_respects_the_feature_flag() {
    let mut store = ephemeral_store();
    let id = store.add("done").unwrap();
    store.toggle(id);
    store.add("open").unwrap();

    store.set_filter(FilterKind::Active);
    assert_eq!(store.active_filter(), FilterKind::Active);
    let visible = store.visible();
    let visible_texts: Vec<&str> = visible.iter().map(|task| task.text.as_str()).collect();
    assert_eq!(visible_texts, vec!["open"]);

    let mut fixed = TodoStore::new(
        StoreConfig {
            filtering: false,
            ..StoreConfig::default()
        },
        MemorySlotStorage::new(),
        SequentialSource::default(),
        FixedClock(NOW_MS),
    );
    fixed.add("everything stays visible").unwrap();
    fixed.set_filter(FilterKind::Completed);
    assert_eq!(fixed.active_filter(), FilterKind::All);
    assert_eq!(fixed.visible().len(), 1);
}

#[test]
fn sections_split_active_and_completed_preserving_order() {
    let mut store = ephemeral_store();
    store.add("open a").unwrap();
    let done = store.add("done").unwrap();
    store.add("open b").unwrap();
    store.toggle(done);

    let sections = store.sections();
    let active: Vec<&str> = sections.active.iter().map(|task| task.text.as_str()).collect();
    let completed: Vec<&str> = sections
        .completed
        .iter()
        .map(|task| task.text.as_str())
        .collect();
    assert_eq!(active, vec!["open b", "open a"]);
    assert_eq!(completed, vec!["done"]);
}

#[test]
fn counts_track_badge_numbers() {
    let mut store = ephemeral_store();
    assert_eq!(store.counts().total, 0);

    let id = store.add("one").unwrap();
    store.add("two").unwrap();
    store.toggle(id);

    let counts = store.counts();
    assert_eq!(counts.total, 2);
    assert_eq!(counts.active, 1);
    assert_eq!(counts.completed, 1);
}

#[test]
fn deterministic_sources_yield_reproducible_tasks() {
    let mut first = ephemeral_store();
    let mut second = ephemeral_store();

    let id_a = first.add("same input").unwrap();
    let id_b = second.add("same input").unwrap();

    assert_eq!(id_a, id_b);
    assert_eq!(first.tasks(), second.tasks());
    assert_eq!(id_a, TaskId::from_u128(1));
}

#[test]
fn grocery_scenario_end_to_end() {
    let mut store = ephemeral_store();

    let milk = store.add("Buy milk").unwrap();
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].text, "Buy milk");
    assert!(!store.tasks()[0].completed);

    store.toggle(milk);
    assert!(store.tasks()[0].completed);

    store.add("Walk dog").unwrap();
    assert_eq!(store.tasks().len(), 2);

    let active = store.filter(FilterKind::Active);
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].text, "Walk dog");

    store.clear_completed();
    let texts: Vec<&str> = store.tasks().iter().map(|task| task.text.as_str()).collect();
    assert_eq!(texts, vec!["Walk dog"]);
}
