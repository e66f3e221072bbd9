//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only see the driving ports, so
//! they can be tested against mocks without any store.

use std::sync::Arc;

use crate::domain::ports::{TodoCommand, TodoQuery};

/// Dependency bundle for the todo handlers.
#[derive(Clone)]
pub struct HttpState {
    pub todos: Arc<dyn TodoCommand>,
    pub todos_query: Arc<dyn TodoQuery>,
}

impl HttpState {
    /// Bundle the todo ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use todo_backend::domain::TodoService;
    /// use todo_backend::inbound::http::state::HttpState;
    /// use todo_backend::outbound::memory::InMemoryTodoRepository;
    ///
    /// let service = Arc::new(TodoService::new(
    ///     Arc::new(InMemoryTodoRepository::default()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// let _query = state.todos_query.clone();
    /// ```
    pub fn new(todos: Arc<dyn TodoCommand>, todos_query: Arc<dyn TodoQuery>) -> Self {
        Self { todos, todos_query }
    }
}
