//! Client data service: API calls with cache upkeep.

use tracing::{debug, warn};

use crate::api::TodoApi;
use crate::cache::TodoCache;
use crate::dashboard::DragMove;
use crate::error::ClientError;
use crate::model::{HealthStatus, Todo, TodoUpdate};

fn log_failure(operation: &str, error: &ClientError) {
    warn!(operation, error = %error, "todo request failed");
}

/// Wraps a [`TodoApi`] and keeps a [`TodoCache`] in step with it.
///
/// A successful mutation is merged into the cache from the response; a failed
/// one leaves the cache as it was and hands the error back.
///
/// # Examples
/// ```no_run
/// use std::time::Duration;
///
/// use todo_client::{HttpTodoApi, TodoDataService};
///
/// # async fn demo() -> Result<(), todo_client::ClientError> {
/// let api = HttpTodoApi::new("http://localhost:3000", Duration::from_secs(5))?;
/// let mut todos = TodoDataService::new(api);
/// todos.refresh().await?;
/// todos.add("Buy milk").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TodoDataService<A> {
    api: A,
    cache: TodoCache,
}

impl<A: TodoApi> TodoDataService<A> {
    /// Service over `api` with an empty cache.
    pub fn new(api: A) -> Self {
        Self {
            api,
            cache: TodoCache::default(),
        }
    }

    /// Current cache.
    pub const fn cache(&self) -> &TodoCache {
        &self.cache
    }

    /// Cached todos in display order.
    pub fn todos(&self) -> &[Todo] {
        self.cache.todos()
    }

    /// Re-fetch the list and replace the cache.
    ///
    /// # Errors
    ///
    /// Returns the [`ClientError`] of the failed request.
    pub async fn refresh(&mut self) -> Result<&[Todo], ClientError> {
        let todos = self
            .api
            .list()
            .await
            .inspect_err(|err| log_failure("load todos", err))?;
        debug!(count = todos.len(), "todo list refreshed");
        self.cache.replace(todos);
        Ok(self.cache.todos())
    }

    /// Create a todo and append it to the cache.
    ///
    /// # Errors
    ///
    /// Returns the [`ClientError`] of the failed request.
    pub async fn add(&mut self, title: &str) -> Result<Todo, ClientError> {
        let todo = self
            .api
            .create(title)
            .await
            .inspect_err(|err| log_failure("add todo", err))?;
        self.cache.upsert(todo.clone());
        Ok(todo)
    }

    /// Apply a partial update and overwrite the cached todo.
    ///
    /// # Errors
    ///
    /// Returns the [`ClientError`] of the failed request.
    pub async fn update(&mut self, id: i64, update: &TodoUpdate) -> Result<Todo, ClientError> {
        let todo = self
            .api
            .update(id, update)
            .await
            .inspect_err(|err| log_failure("update todo", err))?;
        self.cache.upsert(todo.clone());
        Ok(todo)
    }

    /// Flip completion and overwrite the cached todo.
    ///
    /// # Errors
    ///
    /// Returns the [`ClientError`] of the failed request.
    pub async fn toggle(&mut self, id: i64) -> Result<Todo, ClientError> {
        let todo = self
            .api
            .toggle(id)
            .await
            .inspect_err(|err| log_failure("toggle todo", err))?;
        self.cache.upsert(todo.clone());
        Ok(todo)
    }

    /// Delete a todo and drop it from the cache.
    ///
    /// # Errors
    ///
    /// Returns the [`ClientError`] of the failed request.
    pub async fn delete(&mut self, id: i64) -> Result<(), ClientError> {
        self.api
            .delete(id)
            .await
            .inspect_err(|err| log_failure("delete todo", err))?;
        self.cache.remove(id);
        Ok(())
    }

    /// Persist a new order and adopt the returned list.
    ///
    /// # Errors
    ///
    /// Returns the [`ClientError`] of the failed request.
    pub async fn reorder(&mut self, ids: &[i64]) -> Result<&[Todo], ClientError> {
        let todos = self
            .api
            .reorder(ids)
            .await
            .inspect_err(|err| log_failure("reorder todos", err))?;
        self.cache.apply_reorder(todos);
        Ok(self.cache.todos())
    }

    /// Persist a drag-and-drop move over the cached list.
    ///
    /// # Errors
    ///
    /// Returns the [`ClientError`] of the failed request.
    pub async fn move_todo(&mut self, drag: DragMove) -> Result<&[Todo], ClientError> {
        let ids = drag.apply(&self.cache.ids());
        self.reorder(&ids).await
    }

    /// Server health.
    ///
    /// # Errors
    ///
    /// Returns the [`ClientError`] of the failed request.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.api
            .health()
            .await
            .inspect_err(|err| log_failure("check health", err))
    }
}
