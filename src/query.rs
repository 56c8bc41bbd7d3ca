//! Sorted and filtered views over a task store.
//!
//! Queries never touch the store: [`query`] takes a snapshot, sorts it with one
//! of two total orders, then keeps the tasks that pass every configured filter.
//!
//! ## Orders
//!
//! Due dates compare as `YYYYMMDD` integers with "no due date" last.
//!
//! - [`SortKey::Due`]: due ascending, then priority descending, then id ascending
//! - [`SortKey::Priority`]: priority descending, then due ascending, then id ascending
//!
//! ## Examples
//!
//! ```rust
//! use todo_tactician::query::{query, Filter, SortKey};
//! use todo_tactician::{NewTask, TaskStore};
//!
//! let mut store = TaskStore::new();
//! store.add(NewTask::new("later").with_due("2025-09-01").with_priority(5)).unwrap();
//! store.add(NewTask::new("soon").with_due("2025-08-01").with_priority(1)).unwrap();
//! store.add(NewTask::new("someday").with_priority(4)).unwrap();
//!
//! let titles = |tasks: Vec<todo_tactician::Task>| tasks.into_iter().map(|t| t.title).collect::<Vec<_>>();
//!
//! assert_eq!(titles(query(&store, SortKey::Due, &Filter::new())), ["soon", "later", "someday"]);
//! assert_eq!(
//!     titles(query(&store, SortKey::Priority, &Filter::new().with_min_priority(4))),
//!     ["later", "someday"]
//! );
//! ```

use crate::date;
use crate::{Task, TaskStore};
use std::cmp::Ordering;

/// Which total order a listing uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Due,
    Priority,
}

impl SortKey {
    /// Compares two tasks under this order.
    #[must_use]
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortKey::Due => cmp_due_asc(a, b),
            SortKey::Priority => cmp_priority_desc(a, b),
        }
    }
}

/// Due ascending, then priority descending, then id ascending.
#[must_use]
pub fn cmp_due_asc(a: &Task, b: &Task) -> Ordering {
    a.due_key()
        .cmp(&b.due_key())
        .then_with(|| b.priority.cmp(&a.priority))
        .then_with(|| a.id.cmp(&b.id))
}

/// Priority descending, then due ascending, then id ascending.
#[must_use]
pub fn cmp_priority_desc(a: &Task, b: &Task) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| a.due_key().cmp(&b.due_key()))
        .then_with(|| a.id.cmp(&b.id))
}

/// Conditions a listed task must meet, combined with logical AND.
///
/// Unset conditions pass every task.
///
/// # Examples
///
/// ```rust
/// use todo_tactician::query::Filter;
///
/// let filter = Filter::new()
///     .with_due_before("2025-09-01")
///     .with_min_priority(3)
///     .pending_only();
/// assert!(!filter.is_empty());
/// assert!(Filter::new().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    /// Keep tasks due strictly before this `YYYY-MM-DD` date.
    pub due_before: Option<String>,
    /// Keep tasks with at least this priority.
    pub min_priority: Option<u8>,
    /// Keep only tasks that are not done.
    pub pending_only: bool,
}

impl Filter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the due-date cutoff. An empty or invalid date leaves it unset.
    #[must_use]
    pub fn with_due_before(mut self, cutoff: impl Into<String>) -> Self {
        let cutoff = cutoff.into();
        self.due_before = date::parse_due(&cutoff).map(|_| cutoff);
        self
    }

    /// Sets the minimum priority. `0` leaves it unset.
    #[must_use]
    pub fn with_min_priority(mut self, min: u8) -> Self {
        self.min_priority = (min > 0).then_some(min);
        self
    }

    #[must_use]
    pub fn pending_only(mut self) -> Self {
        self.pending_only = true;
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.due_before.is_none() && self.min_priority.is_none() && !self.pending_only
    }

    /// Returns `true` if `task` passes every configured condition.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(cutoff) = &self.due_before {
            if task.due_key() >= date::due_key(cutoff) {
                return false;
            }
        }
        if let Some(min) = self.min_priority {
            if task.priority < min {
                return false;
            }
        }
        !(self.pending_only && task.done)
    }
}

/// Sorts a snapshot of `store` by `sort` and keeps the tasks matching `filter`.
#[must_use]
pub fn query(store: &TaskStore, sort: SortKey, filter: &Filter) -> Vec<Task> {
    let mut tasks = store.snapshot();
    tasks.sort_by(|a, b| sort.compare(a, b));
    tasks.retain(|t| filter.matches(t));
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u32, due: &str, priority: u8, done: bool) -> Task {
        Task {
            id,
            title: format!("task {}", id),
            due: due.to_string(),
            priority,
            done,
        }
    }

    fn store(tasks: Vec<Task>) -> TaskStore {
        let mut store = TaskStore::new();
        for t in tasks {
            store.push(t).unwrap();
        }
        store
    }

    fn ids(tasks: &[Task]) -> Vec<u32> {
        tasks.iter().map(|t| t.id).collect()
    }

    fn fixture() -> TaskStore {
        store(vec![
            task(1, "2025-08-26", 2, false),
            task(2, "", 5, false),
            task(3, "2025-08-26", 4, true),
            task(4, "2025-01-10", 2, false),
            task(5, "2025-08-26", 4, false),
        ])
    }

    #[test]
    fn test_due_order_with_ties() {
        let out = query(&fixture(), SortKey::Due, &Filter::new());
        assert_eq!(ids(&out), vec![4, 3, 5, 1, 2]);
    }

    #[test]
    fn test_priority_order_with_ties() {
        let out = query(&fixture(), SortKey::Priority, &Filter::new());
        assert_eq!(ids(&out), vec![2, 3, 5, 4, 1]);
    }

    #[test]
    fn test_due_before_is_strict_and_skips_undated() {
        let out = query(&fixture(), SortKey::Due, &Filter::new().with_due_before("2025-08-26"));
        assert_eq!(ids(&out), vec![4]);
    }

    #[test]
    fn test_min_priority_is_inclusive() {
        let out = query(&fixture(), SortKey::Due, &Filter::new().with_min_priority(4));
        assert_eq!(ids(&out), vec![3, 5, 2]);
    }

    #[test]
    fn test_pending_only() {
        let out = query(&fixture(), SortKey::Due, &Filter::new().pending_only());
        assert_eq!(ids(&out), vec![4, 5, 1, 2]);
    }

    #[test]
    fn test_filters_compose() {
        let out = query(
            &fixture(),
            SortKey::Priority,
            &Filter::new()
                .with_due_before("2025-12-31")
                .with_min_priority(3)
                .pending_only(),
        );
        assert_eq!(ids(&out), vec![5]);
    }

    #[test]
    fn test_invalid_settings_are_unset() {
        assert!(Filter::new().with_due_before("").is_empty());
        assert!(Filter::new().with_due_before("2025-02-30").is_empty());
        assert!(Filter::new().with_min_priority(0).is_empty());
    }

    #[test]
    fn test_query_does_not_mutate_store() {
        let store = fixture();
        let before = store.snapshot();
        let _ = query(&store, SortKey::Priority, &Filter::new().pending_only());
        assert_eq!(store.as_slice(), before.as_slice());
    }
}
