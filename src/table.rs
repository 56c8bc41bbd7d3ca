//! Fixed-width task table for terminal listings.

use crate::Task;
use std::io::{self, Write};

const TITLE_WIDTH: usize = 30;
const RULE: &str = "+------+--------------------------------+------------+----------+-------+";

/// Fits a title into the title column, marking cut titles with `...`.
#[must_use]
pub fn clip_title(title: &str) -> String {
    if title.chars().count() <= TITLE_WIDTH {
        return title.to_string();
    }
    let mut clipped: String = title.chars().take(TITLE_WIDTH - 3).collect();
    clipped.push_str("...");
    clipped
}

/// Writes `tasks` as a bordered table, header included.
pub fn write_table<W: Write>(out: &mut W, tasks: &[Task]) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "| {:<4} | {:<30} | {:<10} | {:<8} | {:<5} |",
        "ID", "Title", "Due", "Priority", "Done"
    )?;
    writeln!(out, "{}", RULE)?;
    for task in tasks {
        writeln!(
            out,
            "| {:>4} | {:<30} | {:<10} | {:>8} | {:>5} |",
            task.id,
            clip_title(&task.title),
            task.due,
            task.priority,
            if task.done { "yes" } else { "no" }
        )?;
    }
    writeln!(out, "{}", RULE)
}
