//! Task document deserialization.
//!
//! This module provides the [`Deserializer`], a single-pass recursive-descent
//! reader over a [`Cursor`]. It has two layers:
//!
//! - **Value decoders**: [`parse_string`](Deserializer::parse_string),
//!   [`parse_integer`](Deserializer::parse_integer),
//!   [`parse_bool`](Deserializer::parse_bool) and the generic
//!   [`parse_value`](Deserializer::parse_value) used to skip unknown fields
//! - **Document parser**: [`parse_document`](Deserializer::parse_document),
//!   which turns a top-level array of records into a [`TaskStore`]
//!
//! Loading is all-or-nothing. The first syntax error or invalid field aborts
//! the parse and the partially built store is dropped.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use todo_tactician::from_str;
//!
//! let store = from_str(r#"[ { "id": 4, "title": "Ship", "priority": 0, "owner": "me" } ]"#).unwrap();
//! let task = store.get(4).unwrap();
//! assert_eq!(task.title, "Ship");
//! assert_eq!(task.priority, 3); // 0 means "unset"
//! assert_eq!(task.due, "");
//! ```

use crate::cursor::Cursor;
use crate::format::{
    DEFAULT_PRIORITY, DUE_LEN, MAX_PRIORITY, MIN_PRIORITY, TITLE_MAX, UNICODE_PLACEHOLDER,
};
use crate::value::{Map, Value};
use crate::{date, Error, Result, Task, TaskStore};

// Bound on array/object nesting inside skipped values.
const MAX_DEPTH: usize = 128;

/// The task document deserializer.
///
/// Created via [`Deserializer::from_str`].
pub struct Deserializer<'de> {
    cursor: Cursor<'de>,
    depth: usize,
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Deserializer {
            cursor: Cursor::new(input),
            depth: 0,
        }
    }

    /// Read-head position, for callers that inspect what follows a value.
    pub fn cursor(&self) -> &Cursor<'de> {
        &self.cursor
    }

    fn syntax(&self, msg: &str) -> Error {
        Error::syntax(self.cursor.line(), self.cursor.column(), msg)
    }

    fn eof(&self, expected: &str) -> Error {
        Error::unexpected_eof(self.cursor.line(), self.cursor.column(), expected)
    }

    /// Error for a value of the wrong kind at the read-head.
    fn mismatch(&self, expected: &str) -> Error {
        let found = describe(self.cursor.peek());
        match self.cursor.peek() {
            None => self.eof(expected),
            // right kind of start, broken body, e.g. `tru` or `-x`
            Some(_) if found == expected => self.syntax(&format!("malformed {}", expected)),
            Some(_) => Error::type_mismatch(
                self.cursor.line(),
                self.cursor.column(),
                expected,
                &found,
            ),
        }
    }

    /// Error for a missing separator or closing delimiter.
    fn unexpected(&self, expected: &str) -> Error {
        match self.cursor.peek() {
            None => self.eof(expected),
            Some(ch) => self.syntax(&format!("expected {}, found '{}'", expected, ch)),
        }
    }

    /// Decodes a double-quoted string, keeping at most `capacity` characters.
    ///
    /// Accepts the escapes `\" \\ \/ \b \f \n \r \t`. `\u` swallows the next four
    /// characters and yields `?`.
    ///
    /// # Errors
    ///
    /// Fails on a missing opening quote, an unknown escape, or end of input
    /// before the closing quote.
    pub fn parse_string(&mut self, capacity: usize) -> Result<String> {
        self.cursor.skip_whitespace();
        if self.cursor.peek() != Some('"') {
            return Err(self.mismatch("string"));
        }
        self.cursor.get();

        let mut result = String::new();
        let mut kept = 0usize;
        while let Some(ch) = self.cursor.get() {
            let decoded = match ch {
                '"' => return Ok(result),
                '\\' => match self.cursor.get() {
                    Some('"') => '"',
                    Some('\\') => '\\',
                    Some('/') => '/',
                    Some('b') => '\u{0008}',
                    Some('f') => '\u{000C}',
                    Some('n') => '\n',
                    Some('r') => '\r',
                    Some('t') => '\t',
                    Some('u') => {
                        for _ in 0..4 {
                            if self.cursor.get().is_none() {
                                return Err(self.eof("4 characters after \\u"));
                            }
                        }
                        UNICODE_PLACEHOLDER
                    }
                    Some(other) => {
                        return Err(self.syntax(&format!("unknown escape '\\{}'", other)));
                    }
                    None => return Err(self.eof("escape character")),
                },
                other => other,
            };
            if kept < capacity {
                result.push(decoded);
                kept += 1;
            }
        }
        Err(self.eof("closing '\"'"))
    }

    /// Decodes an optionally negative decimal integer that fits in `i32`.
    ///
    /// # Errors
    ///
    /// Fails if no digit follows, or the magnitude exceeds `i32::MAX`.
    pub fn parse_integer(&mut self) -> Result<i32> {
        self.cursor.skip_whitespace();
        let negative = self.cursor.match_literal("-");
        if !self.cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
            return Err(self.mismatch("integer"));
        }

        let mut magnitude: i64 = 0;
        while let Some(digit) = self.cursor.peek().and_then(|c| c.to_digit(10)) {
            self.cursor.get();
            magnitude = magnitude * 10 + i64::from(digit);
            if magnitude > i64::from(i32::MAX) {
                return Err(self.syntax("integer out of range"));
            }
        }

        // magnitude <= i32::MAX, so both signs fit
        let value = if negative { -magnitude } else { magnitude };
        Ok(value as i32)
    }

    /// Decodes the literal `true` or `false`.
    pub fn parse_bool(&mut self) -> Result<bool> {
        self.cursor.skip_whitespace();
        if self.cursor.match_literal("true") {
            Ok(true)
        } else if self.cursor.match_literal("false") {
            Ok(false)
        } else {
            Err(self.mismatch("boolean"))
        }
    }

    pub fn parse_null(&mut self) -> Result<()> {
        self.cursor.skip_whitespace();
        if self.cursor.match_literal("null") {
            Ok(())
        } else {
            Err(self.mismatch("null"))
        }
    }

    /// Decodes any value, dispatching on its first character.
    pub fn parse_value(&mut self) -> Result<Value> {
        self.cursor.skip_whitespace();

        match self.cursor.peek() {
            Some('"') => Ok(Value::String(self.parse_string(usize::MAX)?)),
            Some('[') => self.nested(Self::parse_array),
            Some('{') => self.nested(Self::parse_object),
            Some('t') | Some('f') => Ok(Value::Bool(self.parse_bool()?)),
            Some('n') => {
                self.parse_null()?;
                Ok(Value::Null)
            }
            Some(ch) if ch.is_ascii_digit() || ch == '-' => Ok(Value::Integer(self.parse_integer()?)),
            Some(ch) => Err(self.syntax(&format!("unexpected character '{}'", ch))),
            None => Err(self.eof("value")),
        }
    }

    /// Consumes one value of any kind and discards it.
    pub fn skip_value(&mut self) -> Result<()> {
        self.parse_value().map(drop)
    }

    fn nested(&mut self, parse: fn(&mut Self) -> Result<Value>) -> Result<Value> {
        if self.depth >= MAX_DEPTH {
            return Err(self.syntax("nesting too deep"));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.cursor.get(); // consume '['
        let mut elements = Vec::new();
        if self.cursor.expect(']') {
            return Ok(Value::Array(elements));
        }

        loop {
            elements.push(self.parse_value()?);
            if self.cursor.expect(',') {
                continue;
            }
            if self.cursor.expect(']') {
                return Ok(Value::Array(elements));
            }
            return Err(self.unexpected("',' or ']'"));
        }
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.cursor.get(); // consume '{'
        let mut map = Map::new();
        if self.cursor.expect('}') {
            return Ok(Value::Object(map));
        }

        loop {
            let key = self.parse_string(usize::MAX)?;
            if !self.cursor.expect(':') {
                return Err(self.unexpected("':' after key"));
            }
            let value = self.parse_value()?;
            map.insert(key, value);
            if self.cursor.expect(',') {
                continue;
            }
            if self.cursor.expect('}') {
                return Ok(Value::Object(map));
            }
            return Err(self.unexpected("',' or '}'"));
        }
    }

    /// Parses a whole task document into a store.
    ///
    /// Anything after the closing `]` is ignored.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error, or [`Error::InvalidRecord`] for the first
    /// record whose due date, priority or id is invalid. No store is returned
    /// in either case.
    pub fn parse_document(&mut self) -> Result<TaskStore> {
        if !self.cursor.expect('[') {
            return Err(self.unexpected("'[' at start of document"));
        }

        let mut store = TaskStore::new();
        if self.cursor.expect(']') {
            return Ok(store);
        }

        let mut record = 0usize;
        loop {
            record += 1;
            let task = self.parse_record(record)?;
            let id = task.id;
            store
                .push(task)
                .map_err(|_| Error::invalid_record(record, "id", format!("duplicate id {}", id)))?;

            if self.cursor.expect(',') {
                continue;
            }
            if self.cursor.expect(']') {
                return Ok(store);
            }
            return Err(self.unexpected("',' or ']' after record"));
        }
    }

    /// Parses one `{ ... }` record and applies the load-time field rules.
    fn parse_record(&mut self, record: usize) -> Result<Task> {
        if !self.cursor.expect('{') {
            return Err(self.unexpected("'{' to open a record"));
        }

        let mut id = 0i32;
        let mut title = String::new();
        let mut due = String::new();
        let mut priority = 0i32;
        let mut done = false;

        loop {
            let key = self.parse_string(usize::MAX)?;
            if !self.cursor.expect(':') {
                return Err(self.unexpected("':' after key"));
            }
            match key.as_str() {
                "id" => id = self.parse_integer()?,
                "title" => title = self.parse_string(TITLE_MAX)?,
                "due" => due = self.parse_string(DUE_LEN)?,
                "priority" => priority = self.parse_integer()?,
                "done" => done = self.parse_bool()?,
                _ => self.skip_value()?,
            }
            if self.cursor.expect(',') {
                continue;
            }
            if self.cursor.expect('}') {
                break;
            }
            return Err(self.unexpected("',' or '}'"));
        }

        if priority == 0 {
            priority = i32::from(DEFAULT_PRIORITY);
        }
        if !date::is_valid_due(&due) {
            return Err(Error::invalid_record(
                record,
                "due",
                format!("`{}` is not a date in YYYY-MM-DD form", due),
            ));
        }
        if !(i32::from(MIN_PRIORITY)..=i32::from(MAX_PRIORITY)).contains(&priority) {
            return Err(Error::invalid_record(
                record,
                "priority",
                format!("{} is not between {} and {}", priority, MIN_PRIORITY, MAX_PRIORITY),
            ));
        }
        if id <= 0 {
            return Err(Error::invalid_record(
                record,
                "id",
                format!("{} is not a positive id", id),
            ));
        }

        Ok(Task {
            id: id as u32,
            title,
            due,
            priority: priority as u8,
            done,
        })
    }
}

fn describe(ch: Option<char>) -> String {
    match ch {
        Some('"') => "string".to_string(),
        Some('[') => "array".to_string(),
        Some('{') => "object".to_string(),
        Some('t') | Some('f') => "boolean".to_string(),
        Some('n') => "null".to_string(),
        Some(c) if c.is_ascii_digit() || c == '-' => "integer".to_string(),
        Some(c) => format!("'{}'", c),
        None => "end of input".to_string(),
    }
}
