// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations over the todo store.

use crate::error::{ApiError, ApiResult};
use crate::request_response::PaginatedTodos;
use crate::validate;
use serde_json::{Map, Value};
use todo_domain::{NewTodo, Todo, TodoPatch};
use todo_persistence::SqliteTodoStore;
use todo_query::{ParamSet, ParserRegistry, RawQuery, compile, next_link, prev_link};
use tracing::{debug, info};
use url::Url;

fn body_object(body: &Value) -> ApiResult<&Map<String, Value>> {
    body.as_object().ok_or_else(|| ApiError::MalformedBody {
        message: String::from("request body must be a JSON object"),
    })
}

/// Lists todos matching the filters in `base`'s query string, one page
/// at a time.
///
/// The query string is parsed against `registry`; any validation error
/// rejects the whole request. Pagination defaults to page 1 with
/// `default_limit` rows. The returned envelope carries `next` and
/// `previous` URLs derived from `base` (empty when not applicable).
///
/// # Errors
///
/// Returns `InvalidQuery` with every accumulated validation error, or
/// `Internal` if the storage layer fails.
pub fn list_todos(
    store: &mut SqliteTodoStore,
    registry: &ParserRegistry,
    base: &Url,
    default_limit: i64,
) -> ApiResult<PaginatedTodos> {
    let raw: RawQuery = base
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let params: ParamSet = ParamSet::parse(registry, &raw)
        .into_result()
        .map_err(|errors| ApiError::InvalidQuery { errors })?
        .with_pagination_defaults(default_limit);

    let results: Vec<Todo> = store.query_todos(&compile(&params))?;
    let total: i64 = store.count_todos(&compile(&params.without_pagination()))?;

    let next: String =
        next_link(&params, base, total).map_or_else(String::new, |u| u.to_string());
    let previous: String = prev_link(&params, base).map_or_else(String::new, |u| u.to_string());

    debug!(
        total = total,
        page = params.current_page(),
        returned = results.len(),
        "Listed todos"
    );

    Ok(PaginatedTodos {
        next,
        previous,
        results,
    })
}

/// Creates a todo record from a JSON body.
///
/// # Errors
///
/// Returns `MalformedBody` when the body is not a JSON object,
/// `InvalidBody` with every failing attribute, or `Internal` if the
/// storage layer fails.
pub fn create_todo(store: &mut SqliteTodoStore, body: &Value) -> ApiResult<Todo> {
    let new_todo: NewTodo = validate::validate_create(body_object(body)?)
        .map_err(|errors| ApiError::InvalidBody { errors })?;

    let todo: Todo = store.insert_todo(&new_todo)?;
    info!(id = todo.id, "Created todo");
    Ok(todo)
}

/// Retrieves a todo record by id.
///
/// # Errors
///
/// Returns `NotFound` when no record has that id, or `Internal` if the
/// storage layer fails.
pub fn retrieve_todo(store: &mut SqliteTodoStore, id: i64) -> ApiResult<Todo> {
    store.get_todo(id)?.ok_or(ApiError::NotFound { id })
}

/// Applies a partial update to a todo record and returns the updated
/// record.
///
/// # Errors
///
/// Returns `MalformedBody`/`InvalidBody` for bad input, `NotFound`
/// when no record has that id, or `Internal` if the storage layer
/// fails.
pub fn update_todo(store: &mut SqliteTodoStore, id: i64, body: &Value) -> ApiResult<Todo> {
    let patch: TodoPatch = validate::validate_patch(body_object(body)?)
        .map_err(|errors| ApiError::InvalidBody { errors })?;

    let todo: Todo = store
        .update_todo(id, &patch)?
        .ok_or(ApiError::NotFound { id })?;
    info!(id = id, "Updated todo");
    Ok(todo)
}

/// Deletes a todo record by id.
///
/// # Errors
///
/// Returns `NotFound` when no record has that id, or `Internal` if the
/// storage layer fails.
pub fn delete_todo(store: &mut SqliteTodoStore, id: i64) -> ApiResult<()> {
    if store.delete_todo(id)? {
        info!(id = id, "Deleted todo");
        Ok(())
    } else {
        Err(ApiError::NotFound { id })
    }
}
