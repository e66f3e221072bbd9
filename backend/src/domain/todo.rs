//! Todo aggregate and its validated value types.
//!
//! A todo is identified by a store-assigned [`TodoId`], carries a trimmed
//! [`TodoTitle`], a completion flag, a 1-based display `order`, and audit
//! timestamps. Mutating methods take the current instant and keep
//! `updated_at` strictly increasing.

use std::fmt;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of characters allowed in a todo title.
pub const TODO_TITLE_MAX: usize = 255;

/// Validation errors raised by todo constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TodoValidationError {
    /// Identifiers are positive integers.
    #[error("todo id must be a positive integer, got {value}")]
    InvalidId { value: i64 },
    /// The title was empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,
    /// The title exceeded [`TODO_TITLE_MAX`] characters.
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    /// Display positions start at 1.
    #[error("order must be at least 1")]
    InvalidOrder,
    /// `updated_at` preceded `created_at`.
    #[error("updated_at must not precede created_at")]
    UpdatedBeforeCreated,
}

/// Store-assigned todo identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TodoId(i64);

impl TodoId {
    /// Validate and wrap a raw identifier.
    ///
    /// # Examples
    /// ```
    /// use todo_backend::domain::TodoId;
    ///
    /// assert!(TodoId::new(3).is_ok());
    /// assert!(TodoId::new(0).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, TodoValidationError> {
        if value < 1 {
            return Err(TodoValidationError::InvalidId { value });
        }
        Ok(Self(value))
    }

    /// Raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for TodoId {
    type Error = TodoValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TodoId> for i64 {
    fn from(value: TodoId) -> Self {
        value.0
    }
}

/// Todo title, trimmed of surrounding whitespace and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoTitle(String);

impl TodoTitle {
    /// Normalise and validate a title.
    ///
    /// # Examples
    /// ```
    /// use todo_backend::domain::TodoTitle;
    ///
    /// let title = TodoTitle::new("  Buy milk ").expect("valid title");
    /// assert_eq!(title.as_ref(), "Buy milk");
    /// assert!(TodoTitle::new("   ").is_err());
    /// ```
    pub fn new(title: impl Into<String>) -> Result<Self, TodoValidationError> {
        let raw = title.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TodoValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > TODO_TITLE_MAX {
            return Err(TodoValidationError::TitleTooLong {
                max: TODO_TITLE_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for TodoTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TodoTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TodoTitle {
    type Error = TodoValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TodoTitle> for String {
    fn from(value: TodoTitle) -> Self {
        value.0
    }
}

/// Truncate an instant to the microsecond precision of the todo store.
pub fn store_timestamp(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(6)
}

/// Values required to insert a todo; the store assigns id and order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: TodoTitle,
    pub created_at: DateTime<Utc>,
}

impl NewTodo {
    /// Build an insertion draft stamped with `now`.
    pub fn new(title: TodoTitle, now: DateTime<Utc>) -> Self {
        Self {
            title,
            created_at: store_timestamp(now),
        }
    }
}

/// Partial update applied by `PATCH /todos/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<TodoTitle>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    /// Whether the patch carries no fields.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }
}

/// Input for [`Todo::new`].
#[derive(Debug, Clone)]
pub struct TodoDraft {
    pub id: TodoId,
    pub title: TodoTitle,
    pub completed: bool,
    pub order: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A persisted todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id: TodoId,
    title: TodoTitle,
    completed: bool,
    order: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Todo {
    /// Validate a draft into a todo.
    pub fn new(draft: TodoDraft) -> Result<Self, TodoValidationError> {
        let TodoDraft {
            id,
            title,
            completed,
            order,
            created_at,
            updated_at,
        } = draft;

        if order == 0 {
            return Err(TodoValidationError::InvalidOrder);
        }
        if updated_at < created_at {
            return Err(TodoValidationError::UpdatedBeforeCreated);
        }

        Ok(Self {
            id,
            title,
            completed,
            order,
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn title(&self) -> &TodoTitle {
        &self.title
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    /// 1-based display position.
    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Apply the fields present in `patch` and refresh `updated_at`.
    pub fn apply(&mut self, patch: TodoPatch, now: DateTime<Utc>) {
        let TodoPatch { title, completed } = patch;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(completed) = completed {
            self.completed = completed;
        }
        self.touch(now);
    }

    /// Flip the completion flag and refresh `updated_at`.
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        self.completed = !self.completed;
        self.touch(now);
    }

    /// Move the todo to `order`, refreshing `updated_at` only when it moves.
    ///
    /// Returns whether the position changed.
    pub fn reposition(&mut self, order: u32, now: DateTime<Utc>) -> bool {
        if order == 0 || order == self.order {
            return false;
        }
        self.order = order;
        self.touch(now);
        true
    }

    /// Close a gap left by a deleted todo without counting as a user edit.
    pub(crate) fn shift_up(&mut self) {
        if self.order > 1 {
            self.order -= 1;
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        let now = store_timestamp(now);
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }
}
