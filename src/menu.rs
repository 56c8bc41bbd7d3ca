//! Interactive menu session.
//!
//! A [`Session`] owns the loaded [`TaskStore`] and talks to the user over any
//! `BufRead`/`Write` pair, so the `todo` binary hands it stdin/stdout and tests
//! hand it byte buffers.
//!
//! Input validation here is lenient: a bad answer to a prompt is either asked
//! again or ignored for that field, never fatal.

use crate::query::{query, Filter, SortKey};
use crate::{save, table, Error, NewTask, Result, TaskStore, TaskUpdate};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};

const MENU: &str = "\n[Menu] 1)add 2)list 3)update 4)delete 5)save 6)quit\n> ";
const MAX_ID: u32 = 100_000_000;

/// One interactive editing session over a task document.
pub struct Session<R, W> {
    store: TaskStore,
    path: PathBuf,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(store: TaskStore, path: impl Into<PathBuf>, input: R, output: W) -> Self {
        Session {
            store,
            path: path.into(),
            input,
            output,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn into_store(self) -> TaskStore {
        self.store
    }

    /// Runs the menu until the user quits or input ends; both save the store.
    ///
    /// # Errors
    ///
    /// Fails only when the terminal itself cannot be read or written. Failed
    /// saves are reported to the user and the session goes on.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(line) = self.prompt(MENU)? else {
                self.quit()?;
                return Ok(());
            };
            match line.trim() {
                "1" => self.add()?,
                "2" => self.list()?,
                "3" => self.update()?,
                "4" => self.delete()?,
                "5" => {
                    let msg = if self.save() { "Saved." } else { "Save failed." };
                    writeln!(self.output, "{}", msg)?;
                }
                "6" => {
                    self.quit()?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Choose 1-6.")?,
            }
        }
    }

    fn quit(&mut self) -> Result<()> {
        let msg = if self.save() { "Saved. Bye." } else { "Save failed. Bye." };
        writeln!(self.output, "{}", msg)?;
        Ok(())
    }

    fn save(&mut self) -> bool {
        match save(&self.path, &self.store) {
            Ok(()) => {
                info!(path = %self.path.display(), tasks = self.store.len(), "saved");
                true
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "save failed");
                false
            }
        }
    }

    /// Prints `text` and reads one line without its line ending; `None` at end of input.
    ///
    /// Bytes that are not UTF-8 become U+FFFD instead of failing the session.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let mut line = String::from_utf8_lossy(&buf).into_owned();
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Asks until the answer is an integer in `lo..=hi`, or empty when `allow_empty`.
    fn prompt_number(&mut self, text: &str, lo: u32, hi: u32, allow_empty: bool) -> Result<Option<u32>> {
        loop {
            let Some(line) = self.prompt(text)? else {
                return Ok(None);
            };
            if allow_empty && line.is_empty() {
                return Ok(None);
            }
            match line.trim().parse::<u32>() {
                Ok(n) if (lo..=hi).contains(&n) => return Ok(Some(n)),
                _ => writeln!(self.output, "Invalid. Enter {}..{}.", lo, hi)?,
            }
        }
    }

    fn add(&mut self) -> Result<()> {
        let title = loop {
            match self.prompt("Title: ")? {
                None => return Ok(()),
                Some(t) if t.is_empty() => writeln!(self.output, "Title required.")?,
                Some(t) => break t,
            }
        };
        let due = loop {
            match self.prompt("Due (YYYY-MM-DD or empty): ")? {
                None => return Ok(()),
                Some(d) if crate::date::is_valid_due(&d) => break d,
                Some(_) => writeln!(self.output, "Invalid date. Use YYYY-MM-DD or empty.")?,
            }
        };
        let priority = self.prompt_number("Priority [1-5] (default 3): ", 1, 5, true)?;

        let mut new = NewTask::new(title).with_due(due);
        if let Some(p) = priority {
            new = new.with_priority(p as u8);
        }
        match self.store.add(new) {
            Ok(task) => {
                let id = task.id;
                writeln!(self.output, "Added id {}.", id)?;
            }
            Err(e) => writeln!(self.output, "{}", e)?,
        }
        Ok(())
    }

    fn list(&mut self) -> Result<()> {
        if self.store.is_empty() {
            writeln!(self.output, "No tasks.")?;
            return Ok(());
        }

        let sort = match self.prompt("Sort by: 1) due  2) priority  [1]: ")? {
            Some(s) if s.trim() == "2" => SortKey::Priority,
            _ => SortKey::Due,
        };
        let mut filter = Filter::new();
        if let Some(cutoff) = self.prompt("Filter due before (YYYY-MM-DD) or empty: ")? {
            filter = filter.with_due_before(cutoff.trim());
        }
        if let Some(min) = self.prompt("Min priority [1-5] or 0 for none: ")? {
            if let Ok(min @ 1..=5) = min.trim().parse::<u8>() {
                filter = filter.with_min_priority(min);
            }
        }
        if let Some(pending) = self.prompt("Only pending? 1=yes 0=no [0]: ")? {
            if pending.trim() == "1" {
                filter = filter.pending_only();
            }
        }

        let tasks = query(&self.store, sort, &filter);
        table::write_table(&mut self.output, &tasks)?;
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        if self.store.is_empty() {
            writeln!(self.output, "No tasks.")?;
            return Ok(());
        }
        let Some(id) = self.prompt_number("ID to update: ", 1, MAX_ID, false)? else {
            return Ok(());
        };
        let Some(current) = self.store.get(id).cloned() else {
            writeln!(self.output, "Not found.")?;
            return Ok(());
        };

        if let Some(title) = self.prompt(&format!("Title [{}]: ", current.title))? {
            if !title.is_empty() {
                self.apply(id, TaskUpdate::new().with_title(title))?;
            }
        }
        if let Some(due) = self.prompt(&format!("Due [{}]: ", current.due))? {
            if !due.is_empty() {
                self.apply(id, TaskUpdate::new().with_due(due))?;
            }
        }
        if let Some(priority) = self.prompt(&format!("Priority [{}]: ", current.priority))? {
            if !priority.is_empty() {
                match priority.trim().parse::<u8>() {
                    Ok(p) => self.apply(id, TaskUpdate::new().with_priority(p))?,
                    Err(_) => writeln!(self.output, "Ignored invalid priority.")?,
                }
            }
        }
        let done_prompt = format!("Mark done? 1=yes 0=no [{}]: ", u8::from(current.done));
        if let Some(done) = self.prompt(&done_prompt)? {
            match done.trim() {
                "1" => self.apply(id, TaskUpdate::new().with_done(true))?,
                "0" => self.apply(id, TaskUpdate::new().with_done(false))?,
                _ => {}
            }
        }
        writeln!(self.output, "Updated.")?;
        Ok(())
    }

    /// Applies a one-field edit, reporting a rejected value right away.
    fn apply(&mut self, id: u32, update: TaskUpdate) -> Result<()> {
        let report = self.store.update(id, update)?;
        for rejected in &report.rejected {
            if let Error::InvalidField { field, .. } = rejected {
                let name = if *field == "due" { "date" } else { *field };
                writeln!(self.output, "Ignored invalid {}.", name)?;
            }
        }
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        if self.store.is_empty() {
            writeln!(self.output, "No tasks.")?;
            return Ok(());
        }
        let Some(id) = self.prompt_number("ID to delete: ", 1, MAX_ID, false)? else {
            return Ok(());
        };
        let msg = if self.store.delete(id).is_some() {
            "Deleted."
        } else {
            "Not found."
        };
        writeln!(self.output, "{}", msg)?;
        Ok(())
    }
}
