//! Driving port for todo mutations.
//!
//! Inbound adapters hand raw field values to this port; the implementing
//! service owns validation so every adapter reports the same errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Todo, TodoId};

/// Serializable todo payload for driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPayload {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    pub order: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoPayload {
    fn from(value: Todo) -> Self {
        Self {
            id: value.id(),
            title: value.title().to_string(),
            completed: value.completed(),
            order: value.order(),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        }
    }
}

/// Request to create a todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub title: String,
}

/// Request to update selected fields of a todo.
///
/// At least one of `title` and `completed` must be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub id: TodoId,
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Request naming a single todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoIdRequest {
    pub id: TodoId,
}

/// Request to reorder todos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderTodosRequest {
    pub ids: Vec<TodoId>,
}

/// Response carrying one todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub todo: TodoPayload,
}

/// Response carrying the full ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoListResponse {
    pub todos: Vec<TodoPayload>,
}

/// Driving port for todo write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoCommand: Send + Sync {
    /// Create a todo at the end of the list.
    ///
    /// Fails with `invalid_request` when the trimmed title is empty or too
    /// long.
    async fn create_todo(&self, request: CreateTodoRequest) -> Result<TodoResponse, Error>;

    /// Apply the present fields to an existing todo.
    async fn update_todo(&self, request: UpdateTodoRequest) -> Result<TodoResponse, Error>;

    /// Flip a todo's completion flag.
    async fn toggle_todo(&self, request: TodoIdRequest) -> Result<TodoResponse, Error>;

    /// Permanently delete a todo.
    async fn delete_todo(&self, request: TodoIdRequest) -> Result<(), Error>;

    /// Reassign positions from the given id sequence and return the new list.
    async fn reorder_todos(&self, request: ReorderTodosRequest)
    -> Result<TodoListResponse, Error>;
}
