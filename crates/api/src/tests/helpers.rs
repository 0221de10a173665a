// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use serde_json::{Value, json};
use todo_domain::Todo;
use todo_persistence::SqliteTodoStore;
use url::Url;

pub fn create_test_store() -> SqliteTodoStore {
    SqliteTodoStore::new_in_memory().expect("Failed to create in-memory store")
}

pub fn create_body(desc: &str, due: &str, state: &str) -> Value {
    json!({"desc": desc, "due": due, "state": state})
}

/// Inserts `count` todos due on consecutive days, all in state `todo`.
pub fn seed_todos(store: &mut SqliteTodoStore, count: u8) -> Vec<Todo> {
    (1..=count)
        .map(|day| {
            let body: Value = create_body(
                &format!("task {day}"),
                &format!("2026-03-{day:02}T09:00:00Z"),
                "todo",
            );
            crate::create_todo(store, &body).expect("Failed to seed todo")
        })
        .collect()
}

pub fn list_url(query: &str) -> Url {
    let base: String = format!("http://localhost:8000/{query}");
    Url::parse(&base).expect("Invalid test URL")
}
