//! Translation of pool and Diesel failures into todo repository errors.
//!
//! Only the category and a short description cross the port boundary; the
//! driver's own message is logged at debug level and then dropped.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::TodoRepositoryError;

use super::pool::PoolError;

/// Map pool failures to connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> TodoRepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    TodoRepositoryError::connection(message)
}

/// Map Diesel failures to connection or query errors.
pub(crate) fn map_diesel_error(error: DieselError) -> TodoRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => TodoRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => TodoRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            TodoRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            TodoRepositoryError::query("todo violates a table constraint")
        }
        DieselError::BrokenTransactionManager => {
            TodoRepositoryError::connection("database transaction state lost")
        }
        _ => TodoRepositoryError::query("database error"),
    }
}
