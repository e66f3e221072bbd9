//! Wire types shared by the API adapter, cache, and dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A todo as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Server-assigned identifier.
    pub id: i64,
    /// Trimmed, non-empty title.
    pub title: String,
    /// Completion flag.
    pub completed: bool,
    /// 1-based display position.
    pub order: u32,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the last mutation.
    pub updated_at: DateTime<Utc>,
}

/// Partial update for `PATCH /todos/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoUpdate {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New completion flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `OK` while the server is serving.
    pub status: String,
    /// Server time of the check.
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateTodoBody<'a> {
    pub(crate) title: &'a str,
}

/// Error envelope returned by the backend; only `message` is read.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) message: String,
}
