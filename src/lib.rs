//! # todo_tactician
//!
//! The persistence and query engine of a small todo-list tool.
//!
//! ## What is in here?
//!
//! - **Document reader**: a hand-written recursive-descent parser for a JSON-like
//!   task document, tolerant of unknown keys, strict about everything else
//! - **Document writer**: the matching pretty printer
//! - **Task store**: an owned, growable task collection with id allocation
//! - **Queries**: two multi-key sort orders and composable filters over a snapshot
//! - **Menu**: the interactive session used by the `todo` binary
//!
//! See [`format`] for the document format itself.
//!
//! ## Quick Start
//!
//! ```rust
//! use todo_tactician::query::{query, Filter, SortKey};
//! use todo_tactician::{from_str, to_string, NewTask, TaskUpdate};
//!
//! let mut store = from_str(r#"[
//!   { "id": 1, "title": "Write docs", "due": "2025-08-26", "priority": 5, "done": false },
//!   { "id": 2, "title": "Refactor", "due": "", "priority": 2, "done": true }
//! ]"#).unwrap();
//!
//! let task = store.add(NewTask::new("Release").with_due("2025-08-30")).unwrap();
//! assert_eq!(task.id, 3);
//!
//! store.update(1, TaskUpdate::new().with_done(true)).unwrap();
//!
//! let pending = query(&store, SortKey::Due, &Filter::new().pending_only());
//! assert_eq!(pending.len(), 1);
//! assert_eq!(pending[0].title, "Release");
//!
//! let text = to_string(&store);
//! assert_eq!(from_str(&text).unwrap().len(), 3);
//! ```
//!
//! ## Loading Policy
//!
//! [`load`] is all-or-nothing: one malformed or invalid record rejects the whole
//! document and no store is returned. A missing file is not an error; it loads
//! as an empty store. Interactive edits through [`TaskStore::update`] are judged
//! field by field instead.

pub mod cursor;
pub mod date;
pub mod de;
pub mod error;
pub mod format;
pub mod menu;
pub mod query;
pub mod selftest;
pub mod ser;
pub mod store;
pub mod table;
pub mod task;
pub mod value;

pub use de::Deserializer;
pub use error::{Error, Result};
pub use ser::Serializer;
pub use store::TaskStore;
pub use task::{NewTask, Task, TaskUpdate, UpdateReport};
pub use value::{Map, Value};

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Render a store as a task document.
///
/// # Examples
///
/// ```rust
/// use todo_tactician::{to_string, TaskStore};
///
/// assert_eq!(to_string(&TaskStore::new()), "[\n]\n");
/// ```
#[must_use]
pub fn to_string(store: &TaskStore) -> String {
    let mut serializer = Serializer::new();
    serializer.serialize_store(store);
    serializer.into_inner()
}

/// Write a store as a task document to `writer`.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
pub fn to_writer<W>(mut writer: W, store: &TaskStore) -> Result<()>
where
    W: io::Write,
{
    writer
        .write_all(to_string(store).as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Parse a task document held in a string.
///
/// # Errors
///
/// Returns the first syntax error or invalid record; see [`Deserializer::parse_document`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<TaskStore> {
    Deserializer::from_str(s).parse_document()
}

/// Parse a task document from bytes, which must be UTF-8.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or the document does not parse.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<TaskStore> {
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Read a whole task document from `reader` and parse it.
///
/// # Errors
///
/// Returns an error if reading fails or the document does not parse.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<TaskStore>
where
    R: io::Read,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_slice(&bytes)
}

/// Load the task document at `path`.
///
/// A file that cannot be opened (typically because it does not exist yet)
/// yields an empty store. The file is read into memory in full before parsing.
///
/// # Errors
///
/// Returns an error if an opened file cannot be read or fails to parse. No
/// partial store is ever returned.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn load<P: AsRef<Path>>(path: P) -> Result<TaskStore> {
    let path = path.as_ref();
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            if e.kind() == io::ErrorKind::NotFound {
                debug!(path = %path.display(), "no task document, starting empty");
            } else {
                warn!(path = %path.display(), error = %e, "cannot open task document, starting empty");
            }
            return Ok(TaskStore::new());
        }
    };

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| Error::io(&format!("{}: {}", path.display(), e)))?;
    drop(file);

    match from_slice(&bytes) {
        Ok(store) => {
            debug!(path = %path.display(), tasks = store.len(), "task document loaded");
            Ok(store)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "task document rejected");
            Err(e)
        }
    }
}

/// Save `store` as a task document at `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save<P: AsRef<Path>>(path: P, store: &TaskStore) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_string(store))
        .map_err(|e| Error::io(&format!("{}: {}", path.display(), e)))?;
    debug!(path = %path.display(), tasks = store.len(), "task document saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_in_memory() {
        let mut store = TaskStore::new();
        store
            .add(NewTask::new("a \"quoted\" \\ title").with_due("2024-02-29").with_priority(1))
            .unwrap();
        store.add(NewTask::new("plain")).unwrap();
        store.update(2, TaskUpdate::new().with_done(true)).unwrap();

        let back = from_str(&to_string(&store)).unwrap();
        assert_eq!(back.as_slice(), store.as_slice());
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        assert!(from_slice(&[b'[', 0xff, b']']).is_err());
    }

    #[test]
    fn test_from_reader() {
        let doc = br#"[{"id": 9, "title": "r"}]"#;
        let store = from_reader(&doc[..]).unwrap();
        assert_eq!(store.get(9).unwrap().title, "r");
    }

    #[test]
    fn test_to_writer() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &TaskStore::new()).unwrap();
        assert_eq!(buffer, b"[\n]\n");
    }
}
