//! Builders for the HTTP state from server settings.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use todo_backend::domain::TodoService;
use todo_backend::domain::ports::TodoRepository;
use todo_backend::inbound::http::state::HttpState;
use todo_backend::outbound::memory::InMemoryTodoRepository;
use todo_backend::outbound::persistence::{
    DbPool, DieselTodoRepository, PoolConfig, run_pending_migrations,
};

use super::{ServerError, ServerSettings};

fn state_over<R>(repo: R, clock: Arc<dyn Clock>) -> HttpState
where
    R: TodoRepository + 'static,
{
    let service = Arc::new(TodoService::new(Arc::new(repo), clock));
    HttpState::new(service.clone(), service)
}

/// Build the HTTP state, using PostgreSQL when a database URL is configured.
///
/// Pending migrations are applied before the pool is created.
///
/// # Errors
/// Returns [`ServerError`] when migrations fail or the pool cannot be built.
pub(super) async fn build_http_state(settings: &ServerSettings) -> Result<HttpState, ServerError> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let Some(url) = settings.database_url() else {
        warn!("no database URL configured; todos are kept in memory");
        return Ok(state_over(InMemoryTodoRepository::default(), clock));
    };

    let applied = run_pending_migrations(url).await?;
    info!(applied, "database migrations complete");

    let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.db_max_connections())).await?;
    Ok(state_over(DieselTodoRepository::new(pool), clock))
}
