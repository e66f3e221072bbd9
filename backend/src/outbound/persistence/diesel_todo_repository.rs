//! PostgreSQL-backed `TodoRepository` implementation using Diesel ORM.
//!
//! Inserts, deletes, and reorders run in a transaction that first takes a
//! `SHARE ROW EXCLUSIVE` lock on `todos`, so concurrent writers cannot leave
//! gaps or duplicates in `position`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{TodoRepository, TodoRepositoryError};
use crate::domain::{
    NewTodo, ReorderError, Todo, TodoDraft, TodoId, TodoTitle, resequence,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewTodoRow, TodoRow, TodoUpdate};
use super::pool::DbPool;
use super::schema::todos;

/// Failures raised inside a todo transaction.
#[derive(Debug, thiserror::Error)]
enum TxError {
    #[error(transparent)]
    Diesel(#[from] diesel::result::Error),
    #[error(transparent)]
    Repository(#[from] TodoRepositoryError),
}

impl From<TxError> for TodoRepositoryError {
    fn from(value: TxError) -> Self {
        match value {
            TxError::Diesel(err) => map_diesel_error(err),
            TxError::Repository(err) => err,
        }
    }
}

impl From<ReorderError> for TxError {
    fn from(value: ReorderError) -> Self {
        Self::Repository(match value {
            ReorderError::Unknown { id } => TodoRepositoryError::unknown_todo(id),
            duplicate @ ReorderError::Duplicate { .. } => {
                TodoRepositoryError::query(duplicate.to_string())
            }
        })
    }
}

/// Diesel-backed implementation of the todo repository port.
#[derive(Clone)]
pub struct DieselTodoRepository {
    pool: DbPool,
}

impl DieselTodoRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_position(order: u32) -> Result<i32, TodoRepositoryError> {
    i32::try_from(order)
        .map_err(|_| TodoRepositoryError::query(format!("position {order} out of range")))
}

fn row_to_todo(row: TodoRow) -> Result<Todo, TodoRepositoryError> {
    let TodoRow {
        id,
        title,
        completed,
        position,
        created_at,
        updated_at,
    } = row;
    let map_err = |err: crate::domain::TodoValidationError| {
        TodoRepositoryError::query(format!("stored todo {id} is invalid: {err}"))
    };

    let order = u32::try_from(position)
        .map_err(|_| TodoRepositoryError::query(format!("stored todo {id} has position {position}")))?;
    Todo::new(TodoDraft {
        id: TodoId::new(id).map_err(map_err)?,
        title: TodoTitle::new(title).map_err(map_err)?,
        completed,
        order,
        created_at,
        updated_at,
    })
    .map_err(map_err)
}

fn rows_to_todos(rows: Vec<TodoRow>) -> Result<Vec<Todo>, TodoRepositoryError> {
    rows.into_iter().map(row_to_todo).collect()
}

async fn lock_todos(conn: &mut AsyncPgConnection) -> QueryResult<()> {
    diesel::sql_query("LOCK TABLE todos IN SHARE ROW EXCLUSIVE MODE")
        .execute(conn)
        .await
        .map(|_| ())
}

async fn load_ordered(conn: &mut AsyncPgConnection) -> QueryResult<Vec<TodoRow>> {
    todos::table
        .select(TodoRow::as_select())
        .order((todos::position.asc(), todos::id.asc()))
        .load(conn)
        .await
}

#[async_trait]
impl TodoRepository for DieselTodoRepository {
    async fn list(&self) -> Result<Vec<Todo>, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = load_ordered(&mut conn).await.map_err(map_diesel_error)?;
        rows_to_todos(rows)
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = todos::table
            .find(id.get())
            .select(TodoRow::as_select())
            .first::<TodoRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_todo).transpose()
    }

    async fn insert(&self, todo: &NewTodo) -> Result<Todo, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = conn
            .transaction::<TodoRow, TxError, _>(|conn| {
                async move {
                    lock_todos(conn).await?;
                    let count: i64 = todos::table.count().get_result(conn).await?;
                    let position = i32::try_from(count + 1).map_err(|_| {
                        TodoRepositoryError::query(format!("cannot append after {count} todos"))
                    })?;

                    let row = diesel::insert_into(todos::table)
                        .values(&NewTodoRow {
                            title: todo.title.as_ref(),
                            completed: false,
                            position,
                            created_at: todo.created_at,
                            updated_at: todo.created_at,
                        })
                        .returning(TodoRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await?;

        row_to_todo(row)
    }

    async fn update(&self, todo: &Todo) -> Result<bool, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changed = diesel::update(todos::table.find(todo.id().get()))
            .set(&TodoUpdate {
                title: todo.title().as_ref(),
                completed: todo.completed(),
                updated_at: todo.updated_at(),
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(changed > 0)
    }

    async fn delete(&self, id: TodoId) -> Result<bool, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = conn
            .transaction::<bool, TxError, _>(|conn| {
                async move {
                    lock_todos(conn).await?;
                    let removed: Option<i32> = diesel::delete(todos::table.find(id.get()))
                        .returning(todos::position)
                        .get_result(conn)
                        .await
                        .optional()?;
                    let Some(position) = removed else {
                        return Ok(false);
                    };

                    diesel::update(todos::table.filter(todos::position.gt(position)))
                        .set(todos::position.eq(todos::position - 1))
                        .execute(conn)
                        .await?;
                    Ok(true)
                }
                .scope_boxed()
            })
            .await?;

        Ok(deleted)
    }

    async fn count(&self) -> Result<u64, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = todos::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(count).map_err(|err| TodoRepositoryError::query(err.to_string()))
    }

    async fn reorder(
        &self,
        ids: &[TodoId],
        now: DateTime<Utc>,
    ) -> Result<Vec<Todo>, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let todos = conn
            .transaction::<Vec<Todo>, TxError, _>(|conn| {
                async move {
                    lock_todos(conn).await?;
                    let mut current = rows_to_todos(load_ordered(conn).await?)?;
                    let current_ids: Vec<TodoId> = current.iter().map(Todo::id).collect();
                    let sequence = resequence(&current_ids, ids)?;

                    for (index, id) in sequence.into_iter().enumerate() {
                        let order = u32::try_from(index + 1).map_err(|_| {
                            TodoRepositoryError::query("too many todos to reorder")
                        })?;
                        let Some(todo) = current.iter_mut().find(|todo| todo.id() == id) else {
                            continue;
                        };
                        if !todo.reposition(order, now) {
                            continue;
                        }
                        diesel::update(todos::table.find(id.get()))
                            .set((
                                todos::position.eq(to_position(order)?),
                                todos::updated_at.eq(todo.updated_at()),
                            ))
                            .execute(conn)
                            .await?;
                    }

                    current.sort_by_key(|todo| (todo.order(), todo.id()));
                    Ok(current)
                }
                .scope_boxed()
            })
            .await?;

        Ok(todos)
    }
}
