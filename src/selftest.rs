//! Built-in save/load round-trip check behind `todo --test`.

use crate::{load, save, Error, Result, Task, TaskStore};
use tracing::debug;

fn fixture() -> Result<TaskStore> {
    let mut store = TaskStore::new();
    store.push(Task {
        id: 1,
        title: "Write \"docs\" \\ core".to_string(),
        due: "2025-08-26".to_string(),
        priority: 5,
        done: false,
    })?;
    store.push(Task {
        id: 2,
        title: "Refactor".to_string(),
        due: String::new(),
        priority: 2,
        done: true,
    })?;
    Ok(store)
}

/// Saves a small store with awkward titles to a temporary file, loads it back
/// and compares record by record.
///
/// Returns the number of records checked.
///
/// # Errors
///
/// Fails if the temporary file cannot be written or read, or the reloaded
/// records differ from the saved ones.
pub fn run() -> Result<usize> {
    let expected = fixture()?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("tasks_test.json");

    save(&path, &expected)?;
    let actual = load(&path)?;
    debug!(path = %path.display(), "self-test document reloaded");

    if actual.as_slice() != expected.as_slice() {
        return Err(Error::custom(format!(
            "round-trip mismatch: saved {} records, reloaded {:?}",
            expected.len(),
            actual.as_slice()
        )));
    }
    Ok(expected.len())
}
