//! Load and save the task list as plain text, one task per line.
//!
//! Line format, fields joined by `" | "`:
//! - `T | 1 | read book`
//! - `D | 0 | return book | 2026-02-01`
//! - `E | 0 | meeting | 2026-02-01 1400 | 2026-02-01 1600`
//!
//! Loading is tolerant: a missing or unreadable file yields an empty
//! list, and any line that fails to decode is skipped rather than
//! failing the load. Saving rewrites the whole file; the caller decides
//! what to do with a write failure.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::task::{Task, TaskKind, TaskList, DATE_FORMAT};

/// Reads and writes the task save file.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    /// Create a storage backed by the given file path. The file need not
    /// exist yet.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all tasks from the backing file.
    ///
    /// A missing or unreadable file yields an empty list. Blank lines
    /// and lines that fail to decode are skipped.
    pub fn load(&self) -> TaskList {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return TaskList::new(),
        };

        let mut tasks = TaskList::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(task) = decode_task(line) {
                tasks.add(task);
            }
        }
        tasks
    }

    /// Overwrite the backing file with one line per task, in list order.
    ///
    /// Creates the parent directory if missing. The caller owns the
    /// failure handling; the in-memory list stays the source of truth.
    pub fn save(&self, tasks: &TaskList) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut content = String::new();
        for task in tasks.iter() {
            content.push_str(&encode_task(task));
            content.push('\n');
        }
        fs::write(&self.path, content)
    }
}

/// Encode one task as a save-file line.
pub fn encode_task(task: &Task) -> String {
    let done = if task.done { "1" } else { "0" };
    match &task.kind {
        TaskKind::Todo => format!("T | {} | {}", done, task.description),
        TaskKind::Deadline { by } => format!(
            "D | {} | {} | {}",
            done,
            task.description,
            by.format(DATE_FORMAT)
        ),
        TaskKind::Event { from, to } => {
            format!("E | {} | {} | {} | {}", done, task.description, from, to)
        }
    }
}

/// Decode one save-file line into a task.
///
/// Returns `None` for anything invalid: fewer than 3 fields, a blank
/// description, an unknown type tag, a missing date/from/to field, or a
/// deadline date that does not parse. The done field maps `"1"` to done
/// and anything else to not-done.
pub fn decode_task(line: &str) -> Option<Task> {
    let fields: Vec<&str> = line.split('|').map(str::trim).collect();
    if fields.len() < 3 {
        return None;
    }

    let done = fields[1] == "1";
    let description = fields[2];
    if description.is_empty() {
        return None;
    }

    let mut task = match fields[0] {
        "T" => Task::todo(description),
        "D" => {
            let by = NaiveDate::parse_from_str(fields.get(3)?, DATE_FORMAT).ok()?;
            Task::deadline(description, by)
        }
        "E" => Task::event(description, *fields.get(3)?, *fields.get(4)?),
        _ => return None,
    };

    if done {
        task.mark();
    }
    Some(task)
}
