//! Client data service and dashboard state for the todo backend.
//!
//! The crate talks to the REST API through the [`TodoApi`] port, keeps a
//! local [`TodoCache`] in step with successful mutations, and derives what a
//! dashboard shows (filtered view, counts, completion chart) from the list.
//!
//! # Example
//!
//! ```
//! use todo_client::{Dashboard, TodoFilter};
//!
//! let mut dashboard = Dashboard::new(&[]);
//! dashboard.set_filter("pending".parse::<TodoFilter>().expect("known filter"));
//! assert_eq!(dashboard.summary().total, 0);
//! assert_eq!(dashboard.chart().completed.percentage, 0);
//! ```

mod api;
mod cache;
mod dashboard;
mod error;
mod model;
mod service;

pub use api::{HttpTodoApi, TodoApi};
pub use cache::TodoCache;
pub use dashboard::{
    ChartSegment, CompletionChart, Dashboard, DragMove, TodoFilter, TodoSummary, UnknownFilter,
};
pub use error::ClientError;
pub use model::{HealthStatus, Todo, TodoUpdate};
pub use service::TodoDataService;
