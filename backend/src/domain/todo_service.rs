//! Todo domain service.
//!
//! Implements the todo driving ports on top of any [`TodoRepository`]. Title
//! and reorder validation happens here so every inbound adapter reports the
//! same errors.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{error, info};

use crate::domain::ports::{
    CreateTodoRequest, ReorderTodosRequest, TodoCommand, TodoIdRequest, TodoListResponse,
    TodoQuery, TodoRepository, TodoRepositoryError, TodoResponse, UpdateTodoRequest,
};
use crate::domain::{
    Error, NewTodo, ReorderError, Todo, TodoId, TodoPatch, TodoTitle, TodoValidationError,
    ensure_distinct,
};

fn map_repository_error(error: TodoRepositoryError) -> Error {
    match error {
        // Store detail stays in the log; callers only see a fixed message.
        TodoRepositoryError::Connection { message } => {
            error!(%message, "todo repository unavailable");
            Error::internal("todo repository unavailable")
        }
        TodoRepositoryError::Query { message } => {
            error!(%message, "todo repository query failed");
            Error::internal("todo repository error")
        }
        TodoRepositoryError::UnknownTodo { id } => todo_not_found(id),
    }
}

fn todo_not_found(id: TodoId) -> Error {
    Error::not_found(format!("todo {id} not found")).with_details(json!({
        "id": id.get(),
        "code": "todo_not_found",
    }))
}

fn parse_title(raw: String) -> Result<TodoTitle, Error> {
    TodoTitle::new(raw).map_err(|err| {
        let (message, code) = match err {
            TodoValidationError::EmptyTitle => ("Title is required".to_owned(), "empty_title"),
            other => (other.to_string(), "invalid_title"),
        };
        Error::invalid_request(message).with_details(json!({
            "field": "title",
            "code": code,
        }))
    })
}

fn map_reorder_error(error: ReorderError) -> Error {
    match error {
        ReorderError::Duplicate { id } => Error::invalid_request(error.to_string())
            .with_details(json!({
                "field": "ids",
                "id": id.get(),
                "code": "duplicate_id",
            })),
        ReorderError::Unknown { id } => todo_not_found(id),
    }
}

/// Todo service implementing [`TodoCommand`] and [`TodoQuery`].
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use todo_backend::domain::TodoService;
/// use todo_backend::domain::ports::{CreateTodoRequest, TodoCommand};
/// use todo_backend::outbound::memory::InMemoryTodoRepository;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let service = TodoService::new(
///     Arc::new(InMemoryTodoRepository::default()),
///     Arc::new(DefaultClock),
/// );
/// let created = service
///     .create_todo(CreateTodoRequest { title: "  Buy milk ".into() })
///     .await
///     .expect("created");
/// assert_eq!(created.todo.title, "Buy milk");
/// assert_eq!(created.todo.order, 1);
/// # });
/// ```
#[derive(Clone)]
pub struct TodoService<R> {
    todo_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> TodoService<R> {
    /// Create a service over a todo repository and a clock.
    pub fn new(todo_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { todo_repo, clock }
    }
}

impl<R> TodoService<R>
where
    R: TodoRepository,
{
    async fn save(&self, todo: &Todo) -> Result<(), Error> {
        let matched = self
            .todo_repo
            .update(todo)
            .await
            .map_err(map_repository_error)?;
        if matched {
            Ok(())
        } else {
            Err(todo_not_found(todo.id()))
        }
    }

    async fn load(&self, id: TodoId) -> Result<Todo, Error> {
        self.todo_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| todo_not_found(id))
    }
}

#[async_trait]
impl<R> TodoCommand for TodoService<R>
where
    R: TodoRepository,
{
    async fn create_todo(&self, request: CreateTodoRequest) -> Result<TodoResponse, Error> {
        let title = parse_title(request.title)?;
        let draft = NewTodo::new(title, self.clock.utc());

        let todo = self
            .todo_repo
            .insert(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(id = %todo.id(), order = todo.order(), "todo created");

        Ok(TodoResponse { todo: todo.into() })
    }

    async fn update_todo(&self, request: UpdateTodoRequest) -> Result<TodoResponse, Error> {
        let UpdateTodoRequest {
            id,
            title,
            completed,
        } = request;
        let patch = TodoPatch {
            title: title.map(parse_title).transpose()?,
            completed,
        };
        if patch.is_empty() {
            return Err(Error::invalid_request("No valid fields to update")
                .with_details(json!({ "code": "empty_patch" })));
        }

        let mut todo = self.load(id).await?;
        todo.apply(patch, self.clock.utc());
        self.save(&todo).await?;
        info!(%id, "todo updated");

        Ok(TodoResponse { todo: todo.into() })
    }

    async fn toggle_todo(&self, request: TodoIdRequest) -> Result<TodoResponse, Error> {
        let mut todo = self.load(request.id).await?;
        todo.toggle(self.clock.utc());
        self.save(&todo).await?;
        info!(id = %request.id, completed = todo.completed(), "todo toggled");

        Ok(TodoResponse { todo: todo.into() })
    }

    async fn delete_todo(&self, request: TodoIdRequest) -> Result<(), Error> {
        let deleted = self
            .todo_repo
            .delete(request.id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(todo_not_found(request.id));
        }
        info!(id = %request.id, "todo deleted");
        Ok(())
    }

    async fn reorder_todos(
        &self,
        request: ReorderTodosRequest,
    ) -> Result<TodoListResponse, Error> {
        ensure_distinct(&request.ids).map_err(map_reorder_error)?;

        let todos = self
            .todo_repo
            .reorder(&request.ids, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        info!(listed = request.ids.len(), total = todos.len(), "todos reordered");

        Ok(TodoListResponse {
            todos: todos.into_iter().map(Into::into).collect(),
        })
    }
}

#[async_trait]
impl<R> TodoQuery for TodoService<R>
where
    R: TodoRepository,
{
    async fn list_todos(&self) -> Result<TodoListResponse, Error> {
        let todos = self
            .todo_repo
            .list()
            .await
            .map_err(map_repository_error)?;

        Ok(TodoListResponse {
            todos: todos.into_iter().map(Into::into).collect(),
        })
    }
}

#[cfg(test)]
#[path = "todo_service_tests.rs"]
mod tests;
