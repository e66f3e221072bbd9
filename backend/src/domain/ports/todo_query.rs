//! Driving port for todo reads.

use async_trait::async_trait;

use crate::domain::Error;

use super::todo_command::TodoListResponse;

/// Driving port for todo read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoQuery: Send + Sync {
    /// All todos in display order.
    async fn list_todos(&self) -> Result<TodoListResponse, Error>;
}
