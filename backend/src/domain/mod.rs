//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the todo aggregate, its validation rules, and the service
//! implementing the driving ports. Nothing in here depends on Actix or
//! Diesel; adapters live under `inbound` and `outbound`.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — transport-agnostic failure payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - Todo, TodoId, TodoTitle — the aggregate and its value types.
//! - TodoService — implementation of `TodoCommand` and `TodoQuery`.

pub mod error;
pub mod ports;
pub mod todo;
pub mod todo_order;
pub mod todo_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::todo::{
    NewTodo, TODO_TITLE_MAX, Todo, TodoDraft, TodoId, TodoPatch, TodoTitle, TodoValidationError,
    store_timestamp,
};
pub use self::todo_order::{ReorderError, ensure_distinct, resequence};
pub use self::todo_service::TodoService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
