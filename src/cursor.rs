//! Read-head over an in-memory task document.
//!
//! [`Cursor`] is the lexical layer under the document parser. It only ever
//! advances an offset; the buffer is borrowed and never modified.

/// A position in a borrowed text buffer with line/column bookkeeping.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Cursor {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the next character without consuming it, or `None` at end of input.
    pub fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Consumes and returns the next character.
    pub fn get(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Skips ASCII whitespace only; other Unicode spaces are content.
    pub fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_whitespace() {
                self.get();
            } else {
                break;
            }
        }
    }

    /// Skips whitespace, then consumes `expected` if it is next.
    ///
    /// Returns whether the character was consumed.
    pub fn expect(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.get();
            true
        } else {
            false
        }
    }

    /// Consumes `literal` if the upcoming characters spell it exactly.
    ///
    /// On a mismatch the cursor does not move.
    pub fn match_literal(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            for _ in literal.chars() {
                self.get();
            }
            true
        } else {
            false
        }
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Unconsumed remainder of the buffer.
    pub fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}
