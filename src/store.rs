//! In-memory task collection.
//!
//! [`TaskStore`] owns the records of one session. It grows like a `Vec`
//! (capacity doubles on overflow), allocates ids above the highest id it has
//! ever held, and deletes by swapping the last record into the gap, so
//! iteration order is not stable across deletions.

use crate::error::{Error, Result};
use crate::task::{self, NewTask, Task, TaskUpdate, UpdateReport};
use tracing::{debug, warn};

/// An unordered collection of [`Task`]s with pairwise distinct ids.
#[derive(Clone, Debug, Default)]
pub struct TaskStore {
    items: Vec<Task>,
    // Highest id this store has held, including deleted ones.
    high_water: u32,
}

impl TaskStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        TaskStore {
            items: Vec::with_capacity(capacity),
            high_water: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.items.iter()
    }

    /// Records in current store order.
    #[must_use]
    pub fn as_slice(&self) -> &[Task] {
        &self.items
    }

    /// A throwaway copy of the records for sorting and filtering.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Task> {
        self.items.clone()
    }

    /// The id the next [`add`](Self::add) will assign.
    ///
    /// One above the largest id currently stored or previously deleted from
    /// this store; `1` for a fresh empty store.
    #[must_use]
    pub fn next_id(&self) -> u32 {
        let max_live = self.items.iter().map(|t| t.id).max().unwrap_or(0);
        max_live.max(self.high_water) + 1
    }

    /// Index of the task with `id` in store order.
    #[must_use]
    pub fn find(&self, id: u32) -> Option<usize> {
        self.items.iter().position(|t| t.id == id)
    }

    #[must_use]
    pub fn get(&self, id: u32) -> Option<&Task> {
        self.items.iter().find(|t| t.id == id)
    }

    /// Appends a fully formed record, keeping ids distinct.
    ///
    /// This is the entry point for the document parser; the record's fields
    /// are taken as they are.
    ///
    /// # Errors
    ///
    /// Fails if a task with the same id is already present.
    pub fn push(&mut self, task: Task) -> Result<()> {
        if self.find(task.id).is_some() {
            return Err(Error::invalid_field(
                "id",
                format!("duplicate task id {}", task.id),
            ));
        }
        self.high_water = self.high_water.max(task.id);
        self.items.push(task);
        Ok(())
    }

    /// Creates a task from user input and appends it.
    ///
    /// The title must be non-empty (it is cut to 128 characters), the due date
    /// must be empty or valid, and the priority, when given, must be in
    /// `[1,5]`; an unset priority becomes 3. New tasks start pending.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] for the first field that fails; the
    /// store is left unchanged.
    pub fn add(&mut self, new: NewTask) -> Result<&Task> {
        let title = task::check_title(new.title)?;
        task::check_due(&new.due)?;
        let priority = task::priority_or_default(new.priority)?;

        let id = self.next_id();
        self.high_water = id;
        self.items.push(Task {
            id,
            title,
            due: new.due,
            priority,
            done: false,
        });
        debug!(id, "task added");
        Ok(&self.items[self.items.len() - 1])
    }

    /// Applies the supplied fields of `update` to the task with `id`.
    ///
    /// Fields are validated independently. A bad due date or out-of-range
    /// priority is rejected for that field alone and the old value stays;
    /// the other fields are still applied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no task has `id`. Per-field rejections
    /// are reported through [`UpdateReport::rejected`], not as an error.
    pub fn update(&mut self, id: u32, update: TaskUpdate) -> Result<UpdateReport> {
        let idx = self.find(id).ok_or(Error::NotFound(id))?;
        let task = &mut self.items[idx];
        let mut report = UpdateReport::default();

        if let Some(title) = update.title {
            match task::check_title(title) {
                Ok(title) => {
                    task.title = title;
                    report.applied.push("title");
                }
                Err(e) => report.rejected.push(e),
            }
        }
        if let Some(due) = update.due {
            match task::check_due(&due) {
                Ok(()) => {
                    task.due = due;
                    report.applied.push("due");
                }
                Err(e) => report.rejected.push(e),
            }
        }
        if let Some(priority) = update.priority {
            match task::check_priority(priority) {
                Ok(priority) => {
                    task.priority = priority;
                    report.applied.push("priority");
                }
                Err(e) => report.rejected.push(e),
            }
        }
        if let Some(done) = update.done {
            task.done = done;
            report.applied.push("done");
        }

        for rejection in &report.rejected {
            warn!(id, %rejection, "update field rejected");
        }
        debug!(id, applied = ?report.applied, "task updated");
        Ok(report)
    }

    /// Removes the task with `id` by moving the last record into its slot.
    ///
    /// Returns the removed task, or `None` (and does nothing) if `id` is absent.
    pub fn delete(&mut self, id: u32) -> Option<Task> {
        let idx = self.find(id)?;
        debug!(id, "task deleted");
        Some(self.items.swap_remove(idx))
    }
}

impl<'a> IntoIterator for &'a TaskStore {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
