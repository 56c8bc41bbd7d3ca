//! Error types for loading, saving and editing tasks.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: the task document could not be read or written
//! - **Syntax Errors**: the document breaks the grammar, with line/column information
//! - **Type Mismatches**: a known key holds a value of the wrong kind
//! - **Invalid Records**: a record decoded cleanly but one of its fields is out of range;
//!   this fails the whole load
//! - **Invalid Fields**: an interactive edit supplied a bad value; only that field is rejected
//!
//! ## Examples
//!
//! ```rust
//! use todo_tactician::{from_str, Error};
//!
//! let result = from_str("[ { \"id\": 1, \"due\": \"2025-13-01\" } ]");
//! assert!(matches!(result, Err(Error::InvalidRecord { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by the task engine.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Grammar violation in the task document
    #[error("Syntax error at line {line}, column {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },

    /// A known key carries a value of the wrong type
    #[error("Type mismatch at line {line}, column {col}: expected {expected}, found {found}")]
    TypeMismatch {
        line: usize,
        col: usize,
        expected: String,
        found: String,
    },

    /// Unexpected end of input
    #[error("Unexpected end of input at line {line}, column {col}: expected {expected}")]
    UnexpectedEof {
        line: usize,
        col: usize,
        expected: String,
    },

    /// A record in a stored document failed validation
    #[error("Invalid record #{record} (field `{field}`): {msg}")]
    InvalidRecord {
        record: usize,
        field: &'static str,
        msg: String,
    },

    /// An interactively supplied value failed validation
    #[error("Invalid {field}: {msg}")]
    InvalidField { field: &'static str, msg: String },

    /// No task carries the requested id
    #[error("No task with id {0}")]
    NotFound(u32),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use todo_tactician::Error;
    ///
    /// let err = Error::syntax(3, 5, "expected ':' after key");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates a type mismatch error for a known key holding the wrong kind of value.
    pub fn type_mismatch(line: usize, col: usize, expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            line,
            col,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(line: usize, col: usize, expected: &str) -> Self {
        Error::UnexpectedEof {
            line,
            col,
            expected: expected.to_string(),
        }
    }

    /// Creates a load-time validation error for the `record`-th object (1-based).
    pub fn invalid_record(record: usize, field: &'static str, msg: impl Into<String>) -> Self {
        Error::InvalidRecord {
            record,
            field,
            msg: msg.into(),
        }
    }

    /// Creates an edit-time validation error for a single field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use todo_tactician::Error;
    ///
    /// let err = Error::invalid_field("priority", "must be between 1 and 5");
    /// assert_eq!(err.to_string(), "Invalid priority: must be between 1 and 5");
    /// ```
    pub fn invalid_field(field: &'static str, msg: impl Into<String>) -> Self {
        Error::InvalidField {
            field,
            msg: msg.into(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` for errors caused by the document's structure rather than its values.
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            Error::Syntax { .. } | Error::TypeMismatch { .. } | Error::UnexpectedEof { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
