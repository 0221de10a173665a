// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::SqliteTodoStore;
use time::OffsetDateTime;
use time::macros::datetime;
use todo_domain::{NewTodo, Todo, TodoPatch, TodoState};
use todo_query::{CompiledQuery, ParamSet, ParserRegistry, RawQuery, compile};

fn create_test_store() -> SqliteTodoStore {
    SqliteTodoStore::new_in_memory().expect("Failed to create in-memory store")
}

fn new_todo(desc: &str, due: OffsetDateTime, state: TodoState) -> NewTodo {
    NewTodo::new(String::from(desc), due, state)
}

fn seed_week_of_todos(store: &mut SqliteTodoStore) -> Vec<Todo> {
    let states: [TodoState; 3] = [TodoState::Todo, TodoState::InProgress, TodoState::Done];
    let mut inserted: Vec<Todo> = Vec::new();

    for day in 1..=7_u8 {
        let due: OffsetDateTime = datetime!(2026-03-01 09:00:00 UTC) + time::Duration::days(i64::from(day));
        let state: TodoState = states[usize::from(day) % 3];
        let todo: Todo = store
            .insert_todo(&new_todo(&format!("task {day}"), due, state))
            .expect("Failed to insert fixture");
        inserted.push(todo);
    }

    inserted
}

fn compiled(pairs: &[(&str, &str)]) -> CompiledQuery {
    let registry: ParserRegistry = ParserRegistry::recognized();
    let raw: RawQuery = RawQuery::from_pairs(
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string())),
    );
    let params: ParamSet = ParamSet::parse(&registry, &raw)
        .into_result()
        .expect("Fixture query failed validation");
    compile(&params)
}

#[test]
fn test_insert_assigns_sequential_ids() {
    let mut store: SqliteTodoStore = create_test_store();

    let first: Todo = store
        .insert_todo(&new_todo(
            "first",
            datetime!(2026-03-01 09:00:00 UTC),
            TodoState::Todo,
        ))
        .unwrap();
    let second: Todo = store
        .insert_todo(&new_todo(
            "second",
            datetime!(2026-03-02 09:00:00 UTC),
            TodoState::Done,
        ))
        .unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
}

#[test]
fn test_get_round_trips_inserted_record() {
    let mut store: SqliteTodoStore = create_test_store();
    let due: OffsetDateTime = datetime!(2026-03-01 09:30:15.5 UTC);

    let inserted: Todo = store
        .insert_todo(&new_todo("write report", due, TodoState::InProgress))
        .unwrap();
    let fetched: Todo = store.get_todo(inserted.id).unwrap().unwrap();

    assert_eq!(fetched, inserted);
    assert_eq!(fetched.due, due);
}

#[test]
fn test_get_missing_record_returns_none() {
    let mut store: SqliteTodoStore = create_test_store();
    assert_eq!(store.get_todo(42).unwrap(), None);
}

#[test]
fn test_update_applies_partial_patch() {
    let mut store: SqliteTodoStore = create_test_store();
    let inserted: Todo = store
        .insert_todo(&new_todo(
            "draft",
            datetime!(2026-03-01 09:00:00 UTC),
            TodoState::Todo,
        ))
        .unwrap();

    let patch: TodoPatch = TodoPatch {
        state: Some(TodoState::Done),
        ..TodoPatch::default()
    };
    let updated: Todo = store.update_todo(inserted.id, &patch).unwrap().unwrap();

    assert_eq!(updated.state, TodoState::Done);
    assert_eq!(updated.desc, inserted.desc);
    assert_eq!(updated.due, inserted.due);
}

#[test]
fn test_update_missing_record_returns_none() {
    let mut store: SqliteTodoStore = create_test_store();
    let patch: TodoPatch = TodoPatch {
        desc: Some(String::from("nope")),
        ..TodoPatch::default()
    };

    assert_eq!(store.update_todo(42, &patch).unwrap(), None);
}

#[test]
fn test_update_with_empty_patch_is_a_no_op() {
    let mut store: SqliteTodoStore = create_test_store();
    let inserted: Todo = store
        .insert_todo(&new_todo(
            "unchanged",
            datetime!(2026-03-01 09:00:00 UTC),
            TodoState::Todo,
        ))
        .unwrap();

    let result: Todo = store
        .update_todo(inserted.id, &TodoPatch::default())
        .unwrap()
        .unwrap();
    assert_eq!(result, inserted);
}

#[test]
fn test_delete_removes_record() {
    let mut store: SqliteTodoStore = create_test_store();
    let inserted: Todo = store
        .insert_todo(&new_todo(
            "ephemeral",
            datetime!(2026-03-01 09:00:00 UTC),
            TodoState::Todo,
        ))
        .unwrap();

    assert!(store.delete_todo(inserted.id).unwrap());
    assert_eq!(store.get_todo(inserted.id).unwrap(), None);
    assert!(!store.delete_todo(inserted.id).unwrap());
}

#[test]
fn test_query_with_empty_clause_returns_everything() {
    let mut store: SqliteTodoStore = create_test_store();
    let inserted: Vec<Todo> = seed_week_of_todos(&mut store);

    let results: Vec<Todo> = store.query_todos(&compiled(&[])).unwrap();
    assert_eq!(results, inserted);
}

#[test]
fn test_query_filters_by_state_membership() {
    let mut store: SqliteTodoStore = create_test_store();
    let inserted: Vec<Todo> = seed_week_of_todos(&mut store);

    let results: Vec<Todo> = store
        .query_todos(&compiled(&[("state", "done"), ("state", "in_progress")]))
        .unwrap();

    let expected: Vec<Todo> = inserted
        .into_iter()
        .filter(|t| t.state != TodoState::Todo)
        .collect();
    assert_eq!(results, expected);
}

#[test]
fn test_query_filters_by_due_range() {
    let mut store: SqliteTodoStore = create_test_store();
    let inserted: Vec<Todo> = seed_week_of_todos(&mut store);

    let results: Vec<Todo> = store
        .query_todos(&compiled(&[
            ("due:gt", "2026-03-03T09:00:00Z"),
            ("due:lte", "2026-03-06T09:00:00Z"),
        ]))
        .unwrap();

    let expected: Vec<Todo> = inserted
        .into_iter()
        .filter(|t| {
            t.due > datetime!(2026-03-03 09:00:00 UTC) && t.due <= datetime!(2026-03-06 09:00:00 UTC)
        })
        .collect();
    assert_eq!(results, expected);
    assert!(!results.is_empty());
}

#[test]
fn test_query_distinguishes_sub_second_due_boundaries() {
    let mut store: SqliteTodoStore = create_test_store();
    store
        .insert_todo(&new_todo(
            "early",
            datetime!(2026-03-01 09:00:00.250 UTC),
            TodoState::Todo,
        ))
        .unwrap();
    let late: Todo = store
        .insert_todo(&new_todo(
            "late",
            datetime!(2026-03-01 09:00:00.750 UTC),
            TodoState::Todo,
        ))
        .unwrap();

    let results: Vec<Todo> = store
        .query_todos(&compiled(&[("due:gt", "2026-03-01T09:00:00.500Z")]))
        .unwrap();
    assert_eq!(results, vec![late]);
}

#[test]
fn test_query_applies_limit_and_offset() {
    let mut store: SqliteTodoStore = create_test_store();
    let inserted: Vec<Todo> = seed_week_of_todos(&mut store);

    let results: Vec<Todo> = store
        .query_todos(&compiled(&[("page", "2"), ("count", "3")]))
        .unwrap();
    assert_eq!(results, inserted[3..6].to_vec());
}

#[test]
fn test_count_ignores_pagination_when_stripped() {
    let mut store: SqliteTodoStore = create_test_store();
    seed_week_of_todos(&mut store);

    let registry: ParserRegistry = ParserRegistry::recognized();
    let raw: RawQuery = RawQuery::from_pairs(
        [("page", "2"), ("count", "3")]
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string())),
    );
    let params: ParamSet = ParamSet::parse(&registry, &raw).into_result().unwrap();

    let total: i64 = store
        .count_todos(&compile(&params.without_pagination()))
        .unwrap();
    assert_eq!(total, 7);
}

#[test]
fn test_count_respects_filters() {
    let mut store: SqliteTodoStore = create_test_store();
    let inserted: Vec<Todo> = seed_week_of_todos(&mut store);

    let done: i64 = inserted
        .iter()
        .filter(|t| t.state == TodoState::Done)
        .count()
        .try_into()
        .unwrap();
    let total: i64 = store.count_todos(&compiled(&[("state", "done")])).unwrap();
    assert_eq!(total, done);
}
