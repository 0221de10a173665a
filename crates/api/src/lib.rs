// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the todo record service.
//!
//! The functions in this crate implement the service's operations over
//! a [`SqliteTodoStore`](todo_persistence::SqliteTodoStore): create,
//! retrieve, update, delete, and the filtered, paginated list. They
//! validate untrusted input (query strings via `todo-query`, JSON
//! bodies via [`validate`]) and translate failures into the API error
//! taxonomy consumed by the HTTP layer.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod handlers;
mod request_response;
mod validate;

#[cfg(test)]
mod tests;

pub use error::{ApiError, ApiResult};
pub use handlers::{create_todo, delete_todo, list_todos, retrieve_todo, update_todo};
pub use request_response::PaginatedTodos;
pub use validate::{validate_create, validate_patch};
