//! Task records and the requests that create or change them.

use crate::date;
use crate::error::{Error, Result};
use crate::format::{DEFAULT_PRIORITY, MAX_PRIORITY, MIN_PRIORITY, TITLE_MAX};
use serde::{Deserialize, Serialize};

/// One unit of work.
///
/// Field order matches the order in which the document writer emits them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub title: String,
    /// `YYYY-MM-DD`, or empty for "no due date".
    pub due: String,
    pub priority: u8,
    pub done: bool,
}

impl Task {
    /// Returns `true` while the task is not done.
    #[inline]
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        !self.done
    }

    /// Ordering key of the due date, see [`date::due_key`].
    #[inline]
    #[must_use]
    pub fn due_key(&self) -> u32 {
        date::due_key(&self.due)
    }
}

/// Fields for a task about to be added to a store.
///
/// # Examples
///
/// ```rust
/// use todo_tactician::{NewTask, TaskStore};
///
/// let mut store = TaskStore::new();
/// let task = store
///     .add(NewTask::new("Write docs").with_due("2025-08-26").with_priority(5))
///     .unwrap();
/// assert_eq!(task.id, 1);
/// assert!(!task.done);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub due: String,
    pub priority: Option<u8>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        NewTask {
            title: title.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_due(mut self, due: impl Into<String>) -> Self {
        self.due = due.into();
        self
    }

    /// Sets the priority; leaving it unset gives the default of 3.
    #[must_use]
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// A partial edit of an existing task. `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub due: Option<String>,
    pub priority: Option<u8>,
    pub done: Option<bool>,
}

impl TaskUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new due date. An empty string clears it.
    #[must_use]
    pub fn with_due(mut self, due: impl Into<String>) -> Self {
        self.due = Some(due.into());
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = Some(done);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.due.is_none() && self.priority.is_none() && self.done.is_none()
    }
}

/// Outcome of [`TaskStore::update`](crate::TaskStore::update).
///
/// Each field of a [`TaskUpdate`] is judged on its own: accepted fields are
/// applied, rejected ones keep their old value and are listed here.
#[derive(Clone, Debug, Default)]
pub struct UpdateReport {
    pub applied: Vec<&'static str>,
    pub rejected: Vec<Error>,
}

impl UpdateReport {
    /// Returns `true` when every supplied field was applied.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Cuts `s` down to at most `max` characters.
pub(crate) fn truncate_chars(mut s: String, max: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(max) {
        s.truncate(idx);
    }
    s
}

/// Validates a title supplied by a user: non-empty, truncated to the title capacity.
pub(crate) fn check_title(title: String) -> Result<String> {
    if title.is_empty() {
        return Err(Error::invalid_field("title", "title is required"));
    }
    Ok(truncate_chars(title, TITLE_MAX))
}

pub(crate) fn check_due(due: &str) -> Result<()> {
    if date::is_valid_due(due) {
        Ok(())
    } else {
        Err(Error::invalid_field(
            "due",
            format!("`{}` is not a date in YYYY-MM-DD form", due),
        ))
    }
}

pub(crate) fn check_priority(priority: u8) -> Result<u8> {
    if (MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
        Ok(priority)
    } else {
        Err(Error::invalid_field(
            "priority",
            format!("{} is not between {} and {}", priority, MIN_PRIORITY, MAX_PRIORITY),
        ))
    }
}

/// Priority used when a new task does not specify one.
pub(crate) fn priority_or_default(priority: Option<u8>) -> Result<u8> {
    priority.map_or(Ok(DEFAULT_PRIORITY), check_priority)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("héllo".to_string(), 2), "hé");
        assert_eq!(truncate_chars("abc".to_string(), 3), "abc");
        assert_eq!(truncate_chars(String::new(), 0), "");
    }

    #[test]
    fn test_check_title() {
        assert!(check_title(String::new()).is_err());
        let long = "x".repeat(TITLE_MAX + 20);
        assert_eq!(check_title(long).unwrap().len(), TITLE_MAX);
    }

    #[test]
    fn test_priority_default_and_range() {
        assert_eq!(priority_or_default(None).unwrap(), 3);
        assert_eq!(priority_or_default(Some(5)).unwrap(), 5);
        assert!(priority_or_default(Some(0)).is_err());
        assert!(check_priority(6).is_err());
    }

    #[test]
    fn test_update_builder() {
        assert!(TaskUpdate::new().is_empty());
        let update = TaskUpdate::new().with_done(true);
        assert!(!update.is_empty());
        assert_eq!(update.done, Some(true));
    }

    #[test]
    fn test_task_serde_field_order() {
        let task = Task {
            id: 1,
            title: "a".to_string(),
            due: String::new(),
            priority: 3,
            done: false,
        };
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"title":"a","due":"","priority":3,"done":false}"#
        );
    }
}
