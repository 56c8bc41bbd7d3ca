//! Task document serialization.
//!
//! This module provides the [`Serializer`] that renders a [`TaskStore`] in the
//! document format the [`Deserializer`](crate::Deserializer) reads back.
//!
//! ## Overview
//!
//! - One record per line, two-space indent, fields in the order
//!   `id, title, due, priority, done`
//! - Records appear in store order; nothing is sorted
//! - Strings are always quoted and escaped with the inverse of the reader's
//!   escape set
//!
//! ```rust
//! use todo_tactician::{to_string, NewTask, TaskStore};
//!
//! let mut store = TaskStore::new();
//! store.add(NewTask::new("Say \"hi\"").with_priority(2)).unwrap();
//!
//! assert_eq!(
//!     to_string(&store),
//!     "[\n  { \"id\": 1, \"title\": \"Say \\\"hi\\\"\", \"due\": \"\", \"priority\": 2, \"done\": false }\n]\n"
//! );
//! ```

use crate::{Task, TaskStore};

const INDENT: &str = "  ";

/// The task document serializer.
pub struct Serializer {
    output: String,
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer {
    pub fn new() -> Self {
        // A record line is typically under 100 bytes
        Serializer {
            output: String::with_capacity(256),
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes the whole store as a top-level array.
    pub fn serialize_store(&mut self, store: &TaskStore) {
        self.output.reserve(store.len() * 96);
        self.output.push_str("[\n");
        let last = store.len().saturating_sub(1);
        for (i, task) in store.iter().enumerate() {
            self.output.push_str(INDENT);
            self.serialize_task(task);
            if i < last {
                self.output.push(',');
            }
            self.output.push('\n');
        }
        self.output.push_str("]\n");
    }

    /// Writes one record object on a single line.
    pub fn serialize_task(&mut self, task: &Task) {
        self.output.push_str("{ \"id\": ");
        self.output.push_str(&task.id.to_string());
        self.output.push_str(", \"title\": ");
        self.write_string(&task.title);
        self.output.push_str(", \"due\": ");
        self.write_string(&task.due);
        self.output.push_str(", \"priority\": ");
        self.output.push_str(&task.priority.to_string());
        self.output.push_str(", \"done\": ");
        self.output.push_str(if task.done { "true" } else { "false" });
        self.output.push_str(" }");
    }

    #[inline]
    fn write_string(&mut self, s: &str) {
        self.output.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                c if (c as u32) < 0x20 => {
                    self.output.push_str(&format!("\\u{:04x}", c as u32));
                }
                _ => self.output.push(ch),
            }
        }
        self.output.push('"');
    }
}
