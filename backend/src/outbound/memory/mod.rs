//! Process-local todo store.
//!
//! Used when no database URL is configured and by tests that exercise the
//! service without PostgreSQL. Every operation runs under one async mutex, so
//! each call observes and leaves a consistent list.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::domain::ports::{TodoRepository, TodoRepositoryError};
use crate::domain::{NewTodo, ReorderError, Todo, TodoDraft, TodoId, resequence};

#[derive(Debug, Default)]
struct Store {
    todos: Vec<Todo>,
    last_id: i64,
}

impl Store {
    fn sort(&mut self) {
        self.todos.sort_by_key(|todo| (todo.order(), todo.id()));
    }

    fn position_of(&self, id: TodoId) -> Option<usize> {
        self.todos.iter().position(|todo| todo.id() == id)
    }
}

/// In-memory [`TodoRepository`] keeping todos sorted by position.
///
/// Ids are never reused, even after deletes.
#[derive(Debug, Default)]
pub struct InMemoryTodoRepository {
    store: Mutex<Store>,
}

fn next_order(len: usize) -> Result<u32, TodoRepositoryError> {
    u32::try_from(len + 1).map_err(|_| TodoRepositoryError::query("todo list is full"))
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn list(&self) -> Result<Vec<Todo>, TodoRepositoryError> {
        Ok(self.store.lock().await.todos.clone())
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, TodoRepositoryError> {
        let store = self.store.lock().await;
        Ok(store.todos.iter().find(|todo| todo.id() == id).cloned())
    }

    async fn insert(&self, todo: &NewTodo) -> Result<Todo, TodoRepositoryError> {
        let mut store = self.store.lock().await;
        let id = TodoId::new(store.last_id + 1)
            .map_err(|err| TodoRepositoryError::query(err.to_string()))?;
        let created = Todo::new(TodoDraft {
            id,
            title: todo.title.clone(),
            completed: false,
            order: next_order(store.todos.len())?,
            created_at: todo.created_at,
            updated_at: todo.created_at,
        })
        .map_err(|err| TodoRepositoryError::query(err.to_string()))?;

        store.last_id = id.get();
        store.todos.push(created.clone());
        Ok(created)
    }

    async fn update(&self, todo: &Todo) -> Result<bool, TodoRepositoryError> {
        let mut store = self.store.lock().await;
        let Some(index) = store.position_of(todo.id()) else {
            return Ok(false);
        };
        // Position is owned by insert/delete/reorder; keep the stored one.
        let order = store.todos[index].order();
        let mut updated = todo.clone();
        if updated.order() != order {
            updated = Todo::new(TodoDraft {
                id: updated.id(),
                title: updated.title().clone(),
                completed: updated.completed(),
                order,
                created_at: updated.created_at(),
                updated_at: updated.updated_at(),
            })
            .map_err(|err| TodoRepositoryError::query(err.to_string()))?;
        }
        store.todos[index] = updated;
        Ok(true)
    }

    async fn delete(&self, id: TodoId) -> Result<bool, TodoRepositoryError> {
        let mut store = self.store.lock().await;
        let Some(index) = store.position_of(id) else {
            return Ok(false);
        };
        store.todos.remove(index);
        for todo in store.todos.iter_mut().skip(index) {
            todo.shift_up();
        }
        Ok(true)
    }

    async fn count(&self) -> Result<u64, TodoRepositoryError> {
        let store = self.store.lock().await;
        u64::try_from(store.todos.len()).map_err(|err| TodoRepositoryError::query(err.to_string()))
    }

    async fn reorder(
        &self,
        ids: &[TodoId],
        now: DateTime<Utc>,
    ) -> Result<Vec<Todo>, TodoRepositoryError> {
        let mut store = self.store.lock().await;
        let current: Vec<TodoId> = store.todos.iter().map(Todo::id).collect();
        let sequence = resequence(&current, ids).map_err(|err| match err {
            ReorderError::Unknown { id } => TodoRepositoryError::unknown_todo(id),
            duplicate @ ReorderError::Duplicate { .. } => {
                TodoRepositoryError::query(duplicate.to_string())
            }
        })?;

        for (index, id) in sequence.into_iter().enumerate() {
            let order = next_order(index)?;
            if let Some(todo) = store.todos.iter_mut().find(|todo| todo.id() == id) {
                todo.reposition(order, now);
            }
        }
        store.sort();
        Ok(store.todos.clone())
    }
}
