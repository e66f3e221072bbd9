//! Port for todo persistence.
//!
//! Adapters own id assignment and keep positions contiguous from 1: inserts
//! append, deletes close the gap, and reorders rewrite the whole sequence in
//! one unit of work.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{NewTodo, Todo, TodoId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by todo repository adapters.
    pub enum TodoRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "todo repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "todo repository query failed: {message}",
        /// A reorder named a todo that does not exist; nothing was applied.
        UnknownTodo { id: TodoId } =>
            "todo {id} not found",
    }
}

/// Port for reading and writing todos.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// All todos ordered by position, ties broken by id.
    async fn list(&self) -> Result<Vec<Todo>, TodoRepositoryError>;

    /// Find one todo.
    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, TodoRepositoryError>;

    /// Persist a new todo at the end of the list and return the stored row.
    async fn insert(&self, todo: &NewTodo) -> Result<Todo, TodoRepositoryError>;

    /// Write title, completion, and `updated_at` of an existing todo.
    ///
    /// Returns `false` when no todo has the given id.
    async fn update(&self, todo: &Todo) -> Result<bool, TodoRepositoryError>;

    /// Delete a todo and shift the todos after it up by one position.
    ///
    /// Returns `false` when no todo has the given id.
    async fn delete(&self, id: TodoId) -> Result<bool, TodoRepositoryError>;

    /// Number of stored todos.
    async fn count(&self) -> Result<u64, TodoRepositoryError>;

    /// Apply a new order atomically and return the refreshed list.
    ///
    /// `ids` must be distinct. Listed todos take positions `1..=ids.len()`;
    /// the rest follow in their previous relative order. Todos whose
    /// position changes get `updated_at` refreshed from `now`.
    async fn reorder(
        &self,
        ids: &[TodoId],
        now: DateTime<Utc>,
    ) -> Result<Vec<Todo>, TodoRepositoryError>;
}
