// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::validate::{
    REQUIRED_MESSAGE, STRING_MESSAGE, UNRECOGNIZED_MESSAGE, validate_create, validate_patch,
};
use serde_json::{Map, Value, json};
use time::macros::datetime;
use todo_domain::{NewTodo, TodoPatch, TodoState};
use todo_query::{STATE_ERROR_MESSAGE, TIME_ERROR_MESSAGE, ValidationError};

fn object(value: Value) -> Map<String, Value> {
    value.as_object().expect("Fixture must be an object").clone()
}

#[test]
fn test_create_accepts_complete_body() {
    let body = object(json!({
        "desc": "write report",
        "due": "2026-03-01T12:00:00Z",
        "state": "in_progress",
    }));

    let new_todo: NewTodo = validate_create(&body).unwrap();
    assert_eq!(new_todo.desc, "write report");
    assert_eq!(new_todo.due, datetime!(2026-03-01 12:00:00 UTC));
    assert_eq!(new_todo.state, TodoState::InProgress);
}

#[test]
fn test_create_reports_all_missing_attributes_sorted() {
    let body = object(json!({"due": "2026-03-01T12:00:00Z"}));

    let errors: Vec<ValidationError> = validate_create(&body).unwrap_err();
    assert_eq!(
        errors,
        vec![
            ValidationError::format("desc", "", REQUIRED_MESSAGE),
            ValidationError::format("state", "", REQUIRED_MESSAGE),
        ]
    );
}

#[test]
fn test_create_accumulates_mixed_failures_sorted_by_key() {
    let body = object(json!({
        "desc": "ok",
        "due": "tomorrow",
        "state": "bogus",
    }));

    let errors: Vec<ValidationError> = validate_create(&body).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].key, "due");
    assert_eq!(errors[0].message, TIME_ERROR_MESSAGE);
    assert_eq!(errors[1].key, "state");
    assert_eq!(errors[1].message, STATE_ERROR_MESSAGE);
}

#[test]
fn test_create_rejects_unrecognized_attribute() {
    let body = object(json!({
        "desc": "ok",
        "due": "2026-03-01T12:00:00Z",
        "state": "todo",
        "priority": 5,
    }));

    let errors: Vec<ValidationError> = validate_create(&body).unwrap_err();
    assert_eq!(
        errors,
        vec![ValidationError::format("priority", "5", UNRECOGNIZED_MESSAGE)]
    );
}

#[test]
fn test_create_rejects_non_string_desc() {
    let body = object(json!({
        "desc": 42,
        "due": "2026-03-01T12:00:00Z",
        "state": "todo",
    }));

    let errors: Vec<ValidationError> = validate_create(&body).unwrap_err();
    assert_eq!(
        errors,
        vec![ValidationError::format("desc", "42", STRING_MESSAGE)]
    );
}

#[test]
fn test_patch_accepts_empty_object() {
    let patch: TodoPatch = validate_patch(&Map::new()).unwrap();
    assert!(patch.is_empty());
}

#[test]
fn test_patch_accepts_any_subset() {
    let body = object(json!({"state": "done"}));

    let patch: TodoPatch = validate_patch(&body).unwrap();
    assert_eq!(patch.state, Some(TodoState::Done));
    assert_eq!(patch.desc, None);
    assert_eq!(patch.due, None);
}

#[test]
fn test_patch_rejects_bad_timestamp() {
    let body = object(json!({"due": "next tuesday"}));

    let errors: Vec<ValidationError> = validate_patch(&body).unwrap_err();
    assert_eq!(
        errors,
        vec![ValidationError::format("due", "next tuesday", TIME_ERROR_MESSAGE)]
    );
}

#[test]
fn test_patch_rejects_unrecognized_attribute() {
    let body = object(json!({"color": "red"}));

    let errors: Vec<ValidationError> = validate_patch(&body).unwrap_err();
    assert_eq!(
        errors,
        vec![ValidationError::format("color", "red", UNRECOGNIZED_MESSAGE)]
    );
}
