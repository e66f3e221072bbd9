//! Dashboard state derived from the todo list.
//!
//! Everything here is recomputed from the full list on demand: the filtered
//! view, the summary counts, and the completion chart. Drag-and-drop moves
//! are turned into the id sequence the reorder endpoint expects.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::Todo;

/// Which todos the list view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TodoFilter {
    /// Every todo.
    #[default]
    All,
    /// Todos not yet completed.
    Pending,
    /// Completed todos.
    Completed,
}

impl TodoFilter {
    /// Whether `todo` passes this filter.
    #[must_use]
    pub const fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !todo.completed,
            Self::Completed => todo.completed,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TodoFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when parsing an unknown filter name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter '{0}': expected all, pending, or completed")]
pub struct UnknownFilter(pub String);

impl FromStr for TodoFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(UnknownFilter(s.to_owned())),
        }
    }
}

/// Counts shown above the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoSummary {
    /// All todos.
    pub total: usize,
    /// Completed todos.
    pub completed: usize,
    /// Todos still open.
    pub pending: usize,
}

/// One slice of the completion chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSegment {
    /// Legend label.
    pub label: &'static str,
    /// Number of todos in the slice.
    pub count: usize,
    /// Share of the total, rounded to the nearest percent; 0 when empty.
    pub percentage: u8,
}

impl ChartSegment {
    fn new(label: &'static str, count: usize, total: usize) -> Self {
        Self {
            label,
            count,
            percentage: rounded_percentage(count, total),
        }
    }
}

fn rounded_percentage(count: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    // Half rounds up.
    let scaled = count
        .saturating_mul(200)
        .saturating_add(total)
        .checked_div(total.saturating_mul(2))
        .unwrap_or(0);
    u8::try_from(scaled.min(100)).unwrap_or(100)
}

/// Two-segment doughnut data: completed then pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionChart {
    /// Completed slice.
    pub completed: ChartSegment,
    /// Pending slice.
    pub pending: ChartSegment,
}

impl CompletionChart {
    /// Chart data for a summary.
    #[must_use]
    pub fn from_summary(summary: TodoSummary) -> Self {
        Self {
            completed: ChartSegment::new("Completed", summary.completed, summary.total),
            pending: ChartSegment::new("Pending", summary.pending, summary.total),
        }
    }

    /// Both segments in drawing order.
    #[must_use]
    pub const fn segments(&self) -> [ChartSegment; 2] {
        [self.completed, self.pending]
    }
}

/// A drag from one list index to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragMove {
    /// Index the item was picked up from.
    pub from: usize,
    /// Index the item was dropped at.
    pub to: usize,
}

impl DragMove {
    /// Apply the move to `ids`, clamping both indices into range.
    ///
    /// # Examples
    /// ```
    /// use todo_client::DragMove;
    ///
    /// let moved = DragMove { from: 2, to: 0 }.apply(&[1, 2, 3]);
    /// assert_eq!(moved, [3, 1, 2]);
    /// ```
    #[must_use]
    pub fn apply(self, ids: &[i64]) -> Vec<i64> {
        let mut moved = ids.to_vec();
        let Some(last) = moved.len().checked_sub(1) else {
            return moved;
        };
        let item = moved.remove(self.from.min(last));
        moved.insert(self.to.min(last), item);
        moved
    }
}

/// Dashboard view model over the full todo list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dashboard {
    todos: Vec<Todo>,
    filter: TodoFilter,
}

impl Dashboard {
    /// Dashboard over `todos` with the `all` filter.
    #[must_use]
    pub fn new(todos: &[Todo]) -> Self {
        let mut dashboard = Self::default();
        dashboard.set_todos(todos);
        dashboard
    }

    /// Swap in a fresh copy of the list.
    pub fn set_todos(&mut self, todos: &[Todo]) {
        self.todos = todos.to_vec();
        self.todos.sort_by_key(|todo| (todo.order, todo.id));
    }

    /// Active filter.
    #[must_use]
    pub const fn filter(&self) -> TodoFilter {
        self.filter
    }

    /// Select a filter.
    pub const fn set_filter(&mut self, filter: TodoFilter) {
        self.filter = filter;
    }

    /// Todos passing the active filter, in display order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Todo> {
        self.todos
            .iter()
            .filter(|todo| self.filter.matches(todo))
            .collect()
    }

    /// Counts over the full list, regardless of the filter.
    #[must_use]
    pub fn summary(&self) -> TodoSummary {
        let total = self.todos.len();
        let completed = self.todos.iter().filter(|todo| todo.completed).count();
        TodoSummary {
            total,
            completed,
            pending: total - completed,
        }
    }

    /// Completion chart for the current summary.
    #[must_use]
    pub fn chart(&self) -> CompletionChart {
        CompletionChart::from_summary(self.summary())
    }

    /// Id sequence to send to the reorder endpoint after `drag`.
    ///
    /// Indices refer to the full list, not the filtered view.
    #[must_use]
    pub fn reorder_ids(&self, drag: DragMove) -> Vec<i64> {
        let ids: Vec<i64> = self.todos.iter().map(|todo| todo.id).collect();
        drag.apply(&ids)
    }
}
