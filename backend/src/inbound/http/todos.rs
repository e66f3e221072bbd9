//! Todo HTTP handlers.
//!
//! ```text
//! GET    /todos
//! POST   /todos
//! POST   /todos/reorder
//! PATCH  /todos/{id}
//! PATCH  /todos/{id}/toggle
//! DELETE /todos/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::TodoId;
use crate::domain::ports::{
    CreateTodoRequest, ReorderTodosRequest, TodoIdRequest, TodoPayload, UpdateTodoRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, expect_bool, expect_string, parse_todo_id, parse_todo_id_at,
};

const ID: FieldName = FieldName::new("id");
const TITLE: FieldName = FieldName::new("title");
const COMPLETED: FieldName = FieldName::new("completed");
const IDS: FieldName = FieldName::new("ids");

/// Todo as returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoBody {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Buy milk")]
    pub title: String,
    pub completed: bool,
    /// 1-based display position.
    #[schema(example = 1)]
    pub order: u32,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<TodoPayload> for TodoBody {
    fn from(value: TodoPayload) -> Self {
        Self {
            id: value.id.get(),
            title: value.title,
            completed: value.completed,
            order: value.order,
            created_at: value.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            updated_at: value.updated_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

/// Request body for `POST /todos`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequestBody {
    /// Title; surrounding whitespace is trimmed.
    #[schema(value_type = String, example = "Buy milk")]
    pub title: Option<Value>,
}

/// Request body for `PATCH /todos/{id}`. At least one field is required.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequestBody {
    #[schema(value_type = Option<String>)]
    pub title: Option<Value>,
    #[schema(value_type = Option<bool>)]
    pub completed: Option<Value>,
}

/// Reference to a todo inside a reorder request.
///
/// Clients may send the bare id or the whole todo object; only `id` is read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ReorderItem {
    Id(i64),
    Todo(TodoRef),
}

/// Object form of [`ReorderItem`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct TodoRef {
    pub id: i64,
}

impl ReorderItem {
    fn raw_id(&self) -> i64 {
        match self {
            Self::Id(id) | Self::Todo(TodoRef { id }) => *id,
        }
    }
}

fn parse_reorder_ids(items: &[ReorderItem]) -> ApiResult<Vec<TodoId>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_todo_id_at(item.raw_id(), IDS, index))
        .collect()
}

fn to_bodies(todos: Vec<TodoPayload>) -> Vec<TodoBody> {
    todos.into_iter().map(TodoBody::from).collect()
}

/// List todos in display order.
#[utoipa::path(
    get,
    path = "/todos",
    responses(
        (status = 200, description = "Todos ordered by position", body = [TodoBody]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["todos"],
    operation_id = "listTodos"
)]
#[get("/todos")]
pub async fn list_todos(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<TodoBody>>> {
    let response = state.todos_query.list_todos().await?;
    Ok(web::Json(to_bodies(response.todos)))
}

/// Create a todo at the end of the list.
#[utoipa::path(
    post,
    path = "/todos",
    request_body = CreateTodoRequestBody,
    responses(
        (status = 201, description = "Created todo", body = TodoBody),
        (status = 400, description = "Missing or blank title", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["todos"],
    operation_id = "createTodo"
)]
#[post("/todos")]
pub async fn create_todo(
    state: web::Data<HttpState>,
    payload: web::Json<CreateTodoRequestBody>,
) -> ApiResult<HttpResponse> {
    // A missing title is reported the same way as a blank one.
    let title = match payload.into_inner().title {
        Some(value) => expect_string(value, TITLE)?,
        None => String::new(),
    };

    let response = state.todos.create_todo(CreateTodoRequest { title }).await?;
    Ok(HttpResponse::Created().json(TodoBody::from(response.todo)))
}

/// Reassign positions from an id sequence.
///
/// Listed todos take positions 1..k in request order; the rest keep their
/// relative order after them. The whole request is rejected when an id is
/// repeated or unknown.
#[utoipa::path(
    post,
    path = "/todos/reorder",
    request_body = Vec<ReorderItem>,
    responses(
        (status = 200, description = "Todos in their new order", body = [TodoBody]),
        (status = 400, description = "Invalid or duplicate ids", body = ErrorSchema),
        (status = 404, description = "A listed todo does not exist", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["todos"],
    operation_id = "reorderTodos"
)]
#[post("/todos/reorder")]
pub async fn reorder_todos(
    state: web::Data<HttpState>,
    payload: web::Json<Vec<ReorderItem>>,
) -> ApiResult<web::Json<Vec<TodoBody>>> {
    let ids = parse_reorder_ids(&payload)?;
    let response = state
        .todos
        .reorder_todos(ReorderTodosRequest { ids })
        .await?;
    Ok(web::Json(to_bodies(response.todos)))
}

/// Update the title and/or completion flag of a todo.
#[utoipa::path(
    patch,
    path = "/todos/{id}",
    params(("id" = i64, Path, description = "Todo identifier")),
    request_body = UpdateTodoRequestBody,
    responses(
        (status = 200, description = "Updated todo", body = TodoBody),
        (status = 400, description = "Invalid id or fields", body = ErrorSchema),
        (status = 404, description = "Todo not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["todos"],
    operation_id = "updateTodo"
)]
#[patch("/todos/{id}")]
pub async fn update_todo(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateTodoRequestBody>,
) -> ApiResult<web::Json<TodoBody>> {
    let id = parse_todo_id(&path, ID)?;
    let UpdateTodoRequestBody { title, completed } = payload.into_inner();
    let request = UpdateTodoRequest {
        id,
        title: title.map(|value| expect_string(value, TITLE)).transpose()?,
        completed: completed
            .map(|value| expect_bool(&value, COMPLETED))
            .transpose()?,
    };

    let response = state.todos.update_todo(request).await?;
    Ok(web::Json(TodoBody::from(response.todo)))
}

/// Flip the completion flag of a todo.
#[utoipa::path(
    patch,
    path = "/todos/{id}/toggle",
    params(("id" = i64, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "Toggled todo", body = TodoBody),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Todo not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["todos"],
    operation_id = "toggleTodo"
)]
#[patch("/todos/{id}/toggle")]
pub async fn toggle_todo(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<TodoBody>> {
    let id = parse_todo_id(&path, ID)?;
    let response = state.todos.toggle_todo(TodoIdRequest { id }).await?;
    Ok(web::Json(TodoBody::from(response.todo)))
}

/// Permanently delete a todo.
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    params(("id" = i64, Path, description = "Todo identifier")),
    responses(
        (status = 204, description = "Todo deleted"),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Todo not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["todos"],
    operation_id = "deleteTodo"
)]
#[delete("/todos/{id}")]
pub async fn delete_todo(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_todo_id(&path, ID)?;
    state.todos.delete_todo(TodoIdRequest { id }).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "todos_tests.rs"]
mod tests;
