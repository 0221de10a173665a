// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, NewTodo, Todo, TodoPatch, TodoState};
use std::str::FromStr;
use time::OffsetDateTime;
use time::macros::datetime;

#[test]
fn test_state_from_str_recognizes_all_states() {
    assert_eq!(TodoState::from_str("todo"), Ok(TodoState::Todo));
    assert_eq!(TodoState::from_str("in_progress"), Ok(TodoState::InProgress));
    assert_eq!(TodoState::from_str("done"), Ok(TodoState::Done));
}

#[test]
fn test_state_from_str_rejects_unknown_name() {
    let result: Result<TodoState, DomainError> = TodoState::from_str("bogus");
    assert_eq!(result, Err(DomainError::UnknownState(String::from("bogus"))));
}

#[test]
fn test_state_round_trips_through_external_name() {
    for state in TodoState::ALL {
        assert_eq!(TodoState::from_str(state.as_str()), Ok(state));
    }
}

#[test]
fn test_state_serializes_to_external_name() {
    let json: String = serde_json::to_string(&TodoState::InProgress).unwrap();
    assert_eq!(json, "\"in_progress\"");
}

#[test]
fn test_todo_json_shape() {
    let todo: Todo = Todo {
        id: 7,
        desc: String::from("write report"),
        due: datetime!(2026-03-01 12:00:00 UTC),
        state: TodoState::Todo,
    };

    let json: serde_json::Value = serde_json::to_value(&todo).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["desc"], "write report");
    assert_eq!(json["due"], "2026-03-01T12:00:00Z");
    assert_eq!(json["state"], "todo");
}

#[test]
fn test_new_todo_normalizes_due_to_utc() {
    let due: OffsetDateTime = datetime!(2026-03-01 12:00:00 -5);
    let new_todo: NewTodo = NewTodo::new(String::from("task"), due, TodoState::Todo);

    assert_eq!(new_todo.due.offset(), time::UtcOffset::UTC);
    assert_eq!(new_todo.due, due);
}

#[test]
fn test_patch_emptiness() {
    assert!(TodoPatch::default().is_empty());

    let patch: TodoPatch = TodoPatch {
        state: Some(TodoState::Done),
        ..TodoPatch::default()
    };
    assert!(!patch.is_empty());
}
