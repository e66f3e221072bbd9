//! Local copy of the todo list kept in display order.

use crate::model::Todo;

/// Cached todo list, always sorted by `order`.
///
/// Mutators mirror what the backend does on success so the list can be kept
/// current without re-fetching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoCache {
    todos: Vec<Todo>,
}

impl TodoCache {
    /// Cached todos in display order.
    #[must_use]
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Find a cached todo by id.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Cached ids in display order.
    #[must_use]
    pub fn ids(&self) -> Vec<i64> {
        self.todos.iter().map(|todo| todo.id).collect()
    }

    /// Replace the whole list, as after a fetch.
    pub fn replace(&mut self, todos: Vec<Todo>) {
        self.todos = todos;
        self.sort();
    }

    /// Insert a created todo or overwrite an edited one.
    pub fn upsert(&mut self, todo: Todo) {
        match self.todos.iter_mut().find(|cached| cached.id == todo.id) {
            Some(cached) => *cached = todo,
            None => self.todos.push(todo),
        }
        self.sort();
    }

    /// Drop a deleted todo and close the gap it leaves in `order`.
    ///
    /// Returns `false` when the id was not cached.
    pub fn remove(&mut self, id: i64) -> bool {
        let Some(index) = self.todos.iter().position(|todo| todo.id == id) else {
            return false;
        };
        let removed = self.todos.remove(index);
        for todo in &mut self.todos {
            if todo.order > removed.order {
                todo.order -= 1;
            }
        }
        true
    }

    /// Adopt the result of a reorder.
    ///
    /// The backend answers a reorder with every todo in its new position, so
    /// the cached list is swapped for it wholesale.
    pub fn apply_reorder(&mut self, reordered: Vec<Todo>) {
        self.replace(reordered);
    }

    fn sort(&mut self) {
        self.todos.sort_by_key(|todo| (todo.order, todo.id));
    }
}
