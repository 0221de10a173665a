// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the todo record service.
//!
//! This crate stores todo records in `SQLite` via Diesel. Fixed-shape
//! statements (insert, get, update, delete) use the Diesel DSL; the
//! dynamic filter clause produced by the query compiler is executed
//! through `sql_query` with runtime binds, which is the one place the
//! DSL cannot express the statement.
//!
//! Due timestamps are stored as unix nanoseconds, normalized to UTC.

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

mod data_models;
mod diesel_schema;
mod error;

#[cfg(test)]
mod tests;

use data_models::{NewTodoRow, TodoChangeset, TodoRow, encode_due};
use diesel::connection::SimpleConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};
use diesel::sqlite::Sqlite;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use diesel_schema::todos;
use tracing::{debug, info};

use todo_domain::{NewTodo, Todo, TodoPatch};
use todo_query::{BindValue, CompiledQuery};

pub use error::PersistenceError;

/// Embedded `SQLite` migrations, applied on store construction.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Helper row struct for `COUNT(*)` queries.
#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

/// A `SQLite`-backed todo store.
///
/// The store owns a single connection; callers that share one across
/// request handlers are expected to serialize access themselves.
pub struct SqliteTodoStore {
    conn: SqliteConnection,
}

impl SqliteTodoStore {
    /// Creates a store backed by an in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or migrations fail.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        info!("Opening in-memory todo database");
        Self::establish(":memory:")
    }

    /// Creates a store backed by a database file, creating it on first
    /// use.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or migrations fail.
    pub fn new_with_file(path: &str) -> Result<Self, PersistenceError> {
        info!("Opening todo database at: {}", path);
        Self::establish(path)
    }

    fn establish(database_url: &str) -> Result<Self, PersistenceError> {
        let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;
        conn.batch_execute("PRAGMA foreign_keys = ON")?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Inserts a new todo record and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_todo(&mut self, new_todo: &NewTodo) -> Result<Todo, PersistenceError> {
        let row: NewTodoRow = NewTodoRow::from(new_todo);

        let id: i64 = self.conn.transaction::<i64, PersistenceError, _>(|conn| {
            diesel::insert_into(todos::table)
                .values(&row)
                .execute(conn)?;
            // SQLite doesn't support RETURNING in all contexts, so the
            // assigned rowid is read back explicitly.
            Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
        })?;

        debug!(id = id, "Inserted todo");

        Ok(Todo {
            id,
            desc: new_todo.desc.clone(),
            due: new_todo.due.to_offset(time::UtcOffset::UTC),
            state: new_todo.state,
        })
    }

    /// Retrieves a todo record by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is corrupt.
    /// Returns `Ok(None)` when no record has that id.
    pub fn get_todo(&mut self, id: i64) -> Result<Option<Todo>, PersistenceError> {
        let row: Option<TodoRow> = todos::table
            .find(id)
            .select(TodoRow::as_select())
            .first(&mut self.conn)
            .optional()?;

        row.map(TodoRow::into_todo).transpose()
    }

    /// Applies a partial update to a todo record and returns the
    /// updated record.
    ///
    /// An empty patch leaves the record untouched. Returns `Ok(None)`
    /// when no record has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the update or the re-read fails.
    pub fn update_todo(
        &mut self,
        id: i64,
        patch: &TodoPatch,
    ) -> Result<Option<Todo>, PersistenceError> {
        if patch.is_empty() {
            return self.get_todo(id);
        }

        let changeset: TodoChangeset = TodoChangeset::from(patch);

        let row: Option<TodoRow> =
            self.conn
                .transaction::<Option<TodoRow>, PersistenceError, _>(|conn| {
                    let affected: usize = diesel::update(todos::table.find(id))
                        .set(&changeset)
                        .execute(conn)?;
                    if affected == 0 {
                        return Ok(None);
                    }
                    Ok(todos::table
                        .find(id)
                        .select(TodoRow::as_select())
                        .first(conn)
                        .optional()?)
                })?;

        debug!(id = id, updated = row.is_some(), "Updated todo");

        row.map(TodoRow::into_todo).transpose()
    }

    /// Deletes a todo record by id.
    ///
    /// Returns whether a record was actually deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_todo(&mut self, id: i64) -> Result<bool, PersistenceError> {
        let affected: usize = diesel::delete(todos::table.find(id)).execute(&mut self.conn)?;
        debug!(id = id, deleted = affected > 0, "Deleted todo");
        Ok(affected > 0)
    }

    /// Executes a compiled filter query and returns the matching
    /// records.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt.
    pub fn query_todos(&mut self, query: &CompiledQuery) -> Result<Vec<Todo>, PersistenceError> {
        let statement: String = format!("SELECT * FROM todos {}", query.clause);
        debug!(statement = %statement, binds = query.binds.len(), "Executing todo list query");

        let rows: Vec<TodoRow> = bind_all(diesel::sql_query(statement), &query.binds)
            .load(&mut self.conn)?;

        rows.into_iter().map(TodoRow::into_todo).collect()
    }

    /// Counts the records matching a compiled filter query.
    ///
    /// Callers should pass the count-only variant (pagination stripped)
    /// so the count covers all matching rows regardless of page.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_todos(&mut self, query: &CompiledQuery) -> Result<i64, PersistenceError> {
        let statement: String = format!("SELECT COUNT(*) AS count FROM todos {}", query.clause);
        debug!(statement = %statement, binds = query.binds.len(), "Executing todo count query");

        let row: CountRow =
            bind_all(diesel::sql_query(statement), &query.binds).get_result(&mut self.conn)?;

        Ok(row.count)
    }
}

/// Attaches each bind value to the boxed query, in placeholder order.
fn bind_all(
    query: diesel::query_builder::SqlQuery,
    binds: &[BindValue],
) -> diesel::query_builder::BoxedSqlQuery<'static, Sqlite, diesel::query_builder::SqlQuery> {
    let mut boxed = query.into_boxed();
    for bind in binds {
        boxed = match bind {
            BindValue::Text(s) => boxed.bind::<Text, _>(s.clone()),
            BindValue::Int(i) => boxed.bind::<BigInt, _>(*i),
            BindValue::Timestamp(t) => boxed.bind::<BigInt, _>(encode_due(*t)),
        };
    }
    boxed
}
