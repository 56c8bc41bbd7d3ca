//! Task Document Format
//!
//! This module documents the on-disk task document as read and written by this
//! library, and holds the limits both sides agree on.
//!
//! # Overview
//!
//! A task document is UTF-8 text holding a single top-level array of flat
//! objects, one per task:
//!
//! ```text
//! [
//!   { "id": 1, "title": "Write docs", "due": "2025-08-26", "priority": 5, "done": false },
//!   { "id": 2, "title": "Refactor", "due": "", "priority": 2, "done": true }
//! ]
//! ```
//!
//! ## Fields
//!
//! | Key | Type | Rules |
//! |-----|------|-------|
//! | `id` | integer | positive, unique within the document |
//! | `title` | string | at most [`TITLE_MAX`] characters, longer values are truncated |
//! | `due` | string | `""` or `YYYY-MM-DD`, year [`MIN_YEAR`]..=[`MAX_YEAR`] |
//! | `priority` | integer | [`MIN_PRIORITY`]..=[`MAX_PRIORITY`]; `0` or absent reads as [`DEFAULT_PRIORITY`] |
//! | `done` | boolean | `true` / `false` |
//!
//! Any other key is accepted and its value (string, integer, boolean, `null`,
//! array or object) is skipped. Unknown keys are not written back.
//!
//! ## Strings
//!
//! Strings are always double-quoted. The reader accepts the escapes
//! `\" \\ \/ \b \f \n \r \t` and `\uXXXX`. A `\u` escape consumes four
//! characters and decodes to [`UNICODE_PLACEHOLDER`]; the code point itself is
//! discarded.
//!
//! The writer escapes `\\`, `\"`, `\n`, `\r`, `\t`, and every other control
//! byte below `0x20` as `\u00xx`.
//!
//! ## Numbers
//!
//! Integers only: an optional `-` followed by decimal digits, magnitude at most
//! `i32::MAX`. There are no floats.
//!
//! ## Layout
//!
//! The writer emits one record per line with two-space indent, fields in the
//! fixed order `id, title, due, priority, done`, a comma after every record
//! except the last, and a trailing newline after `]`. The reader is whitespace
//! insensitive and ignores anything after the closing `]`.
//!
//! ## Loading Policy
//!
//! Loading is all-or-nothing: a single syntax error or invalid field in any
//! record rejects the whole document. A missing file is an empty task list.

/// Maximum number of characters kept in a task title.
pub const TITLE_MAX: usize = 128;

/// Length of a `YYYY-MM-DD` date; longer `due` strings are truncated to this.
pub const DUE_LEN: usize = 10;

/// Lowest accepted priority.
pub const MIN_PRIORITY: u8 = 1;

/// Highest accepted priority.
pub const MAX_PRIORITY: u8 = 5;

/// Priority given to tasks that do not specify one.
pub const DEFAULT_PRIORITY: u8 = 3;

/// Earliest year accepted in a due date.
pub const MIN_YEAR: i32 = 1900;

/// Latest year accepted in a due date.
pub const MAX_YEAR: i32 = 2100;

/// Sort key of a task without a due date, ordering it after every real date.
pub const NO_DUE_KEY: u32 = 99_991_231;

/// Character substituted for every `\uXXXX` escape.
pub const UNICODE_PLACEHOLDER: char = '?';

/// Document path used when none is given on the command line.
pub const DEFAULT_PATH: &str = "tasks.json";
