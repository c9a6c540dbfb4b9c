use taskpad_core::{Task, TaskId, TaskValidationError};
use uuid::Uuid;

#[test]
fn task_new_sets_defaults_and_trims_text() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let task = Task::new(id, "  Buy milk  ", 1_700_000_000_000);

    assert_eq!(task.id, id);
    assert_eq!(task.text, "Buy milk");
    assert!(!task.completed);
    assert_eq!(task.created_at, 1_700_000_000_000);
}

#[test]
fn toggled_flips_only_the_completion_flag() {
    let task = Task::new(TaskId::from_u128(7), "Walk dog", 1_700_000_000_000);

    let done = task.toggled();
    assert!(done.completed);
    assert_eq!(done.id, task.id);
    assert_eq!(done.text, task.text);
    assert_eq!(done.created_at, task.created_at);

    assert_eq!(done.toggled(), task);
}

#[test]
fn validate_rejects_blank_text() {
    let mut task = Task::new(TaskId::from_u128(7), "ok", 0);
    task.text = "   ".to_string();

    let err = task.validate().unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyText);
}

#[test]
fn validate_rejects_nil_id() {
    let task = Task::new(Uuid::nil(), "orphan", 0);

    let err = task.validate().unwrap_err();
    assert_eq!(err, TaskValidationError::NilId);
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut task = Task::new(id, "ship the release", 1_700_000_000_000);
    task.completed = true;

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["text"], "ship the release");
    assert_eq!(json["completed"], true);
    assert_eq!(json["createdAt"], 1_700_000_000_000_i64);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}
