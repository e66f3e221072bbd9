//! PostgreSQL persistence adapter for the todo store.
//!
//! `DieselTodoRepository` implements [`TodoRepository`] on top of
//! `diesel-async` with a `bb8` pool. Row structs (`models`) and table
//! definitions (`schema`) stay private to this module; only validated domain
//! todos cross the port.
//!
//! # Example
//!
//! ```no_run
//! use todo_backend::outbound::persistence::{
//!     DbPool, DieselTodoRepository, PoolConfig, run_pending_migrations,
//! };
//!
//! # async fn connect() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://todo@localhost/todos";
//! run_pending_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let repo = DieselTodoRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```
//!
//! [`TodoRepository`]: crate::domain::ports::TodoRepository

mod diesel_error_mapping;
mod diesel_todo_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_todo_repository::DieselTodoRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
