// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::TodoState;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A persisted todo record.
///
/// The JSON shape is `{"id", "desc", "due", "state"}` with `due`
/// rendered as an RFC-3339 timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// The row identifier assigned by the database.
    pub id: i64,
    /// A free-form description of the task.
    pub desc: String,
    /// When the task is due. Always normalized to UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub due: OffsetDateTime,
    /// The current workflow state.
    pub state: TodoState,
}

/// The fields required to create a todo record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    /// A free-form description of the task.
    pub desc: String,
    /// When the task is due.
    pub due: OffsetDateTime,
    /// The initial workflow state.
    pub state: TodoState,
}

impl NewTodo {
    /// Creates a new todo payload with the due timestamp normalized to UTC.
    #[must_use]
    pub fn new(desc: String, due: OffsetDateTime, state: TodoState) -> Self {
        Self {
            desc,
            due: due.to_offset(time::UtcOffset::UTC),
            state,
        }
    }
}

/// A partial update to an existing todo record.
///
/// Every field is optional; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    /// Replacement description, if any.
    pub desc: Option<String>,
    /// Replacement due timestamp, if any.
    pub due: Option<OffsetDateTime>,
    /// Replacement workflow state, if any.
    pub state: Option<TodoState>,
}

impl TodoPatch {
    /// Returns whether this patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.desc.is_none() && self.due.is_none() && self.state.is_none()
    }
}
