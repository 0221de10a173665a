// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs bridging the `todos` table and the domain types.
//!
//! Due timestamps are stored as unix nanoseconds in UTC so that range
//! filters keep full sub-second precision.

use crate::diesel_schema::todos;
use crate::error::PersistenceError;
use diesel::prelude::*;
use std::str::FromStr;
use time::OffsetDateTime;
use todo_domain::{NewTodo, Todo, TodoPatch, TodoState};

/// Converts a due timestamp to its stored representation.
///
/// Saturates outside the i64-nanosecond range (years 1677-2262), which
/// keeps far-out-of-range timestamps ordered correctly in comparisons.
pub(crate) fn encode_due(due: OffsetDateTime) -> i64 {
    let nanos: i128 = due.unix_timestamp_nanos();
    i64::try_from(nanos).unwrap_or(if nanos > 0 { i64::MAX } else { i64::MIN })
}

fn decode_due(nanos: i64) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(nanos))
        .map_err(|_| PersistenceError::InvalidStoredTimestamp(nanos))
}

/// A full row of the `todos` table.
#[derive(Queryable, Selectable, QueryableByName)]
#[diesel(table_name = todos)]
pub(crate) struct TodoRow {
    pub id: i64,
    pub desc: String,
    pub due: i64,
    pub state: String,
}

impl TodoRow {
    /// Converts this row into a domain record.
    pub(crate) fn into_todo(self) -> Result<Todo, PersistenceError> {
        let state: TodoState = TodoState::from_str(&self.state)
            .map_err(|_| PersistenceError::InvalidStoredState(self.state.clone()))?;
        Ok(Todo {
            id: self.id,
            desc: self.desc,
            due: decode_due(self.due)?,
            state,
        })
    }
}

/// The insertable columns of a new todo row.
#[derive(Insertable)]
#[diesel(table_name = todos)]
pub(crate) struct NewTodoRow {
    pub desc: String,
    pub due: i64,
    pub state: String,
}

impl From<&NewTodo> for NewTodoRow {
    fn from(new_todo: &NewTodo) -> Self {
        Self {
            desc: new_todo.desc.clone(),
            due: encode_due(new_todo.due),
            state: new_todo.state.as_str().to_string(),
        }
    }
}

/// The optional column updates of a todo patch.
#[derive(AsChangeset)]
#[diesel(table_name = todos)]
pub(crate) struct TodoChangeset {
    pub desc: Option<String>,
    pub due: Option<i64>,
    pub state: Option<String>,
}

impl From<&TodoPatch> for TodoChangeset {
    fn from(patch: &TodoPatch) -> Self {
        Self {
            desc: patch.desc.clone(),
            due: patch.due.map(encode_due),
            state: patch.state.map(|s| s.as_str().to_string()),
        }
    }
}
