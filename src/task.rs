//! Task types and the in-memory task list.
//!
//! Three task kinds are supported:
//! - `todo` - description only
//! - `deadline` - description plus a due date
//! - `event` - description plus free-form `from`/`to` strings
//!
//! Rendered forms:
//! - `[T] [ ] read book`
//! - `[D] [X] return book (by: Feb 01 2026)`
//! - `[E] [ ] meeting (from: 2026-02-01 1400 to: 2026-02-01 1600)`

use std::fmt;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

/// Storage and input format for deadline dates ("2026-02-01").
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Human-facing date format for rendering deadlines ("Feb 01 2026").
const HUMAN_DATE_FORMAT: &str = "%b %d %Y";

/// Event `from` fields are probed against these when computing reminders.
const EVENT_DATETIME_FORMAT: &str = "%Y-%m-%d %H%M";
const EVENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Kind-specific task data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    /// Plain to-do with no date attached.
    Todo,
    /// Due on a calendar date (no time component).
    Deadline { by: NaiveDate },
    /// Spans a start and end, kept exactly as the user typed them.
    Event { from: String, to: String },
}

/// A single tracked task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// The task description. Never blank: the parser rejects blank
    /// descriptions before construction.
    pub description: String,
    /// Completion flag. New tasks start not-done.
    pub done: bool,
    /// Kind-specific fields.
    pub kind: TaskKind,
}

impl Task {
    /// Create a plain to-do.
    pub fn todo(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            done: false,
            kind: TaskKind::Todo,
        }
    }

    /// Create a deadline due on the given date.
    pub fn deadline(description: impl Into<String>, by: NaiveDate) -> Self {
        Self {
            description: description.into(),
            done: false,
            kind: TaskKind::Deadline { by },
        }
    }

    /// Create an event spanning `from`..`to`.
    pub fn event(
        description: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            done: false,
            kind: TaskKind::Event {
                from: from.into(),
                to: to.into(),
            },
        }
    }

    /// Mark this task as done. Idempotent.
    pub fn mark(&mut self) {
        self.done = true;
    }

    /// Mark this task as not done. Idempotent.
    pub fn unmark(&mut self) {
        self.done = false;
    }

    fn status_icon(&self) -> &'static str {
        if self.done {
            "[X]"
        } else {
            "[ ]"
        }
    }

    /// The instant used to decide whether this task is "upcoming".
    ///
    /// Deadlines resolve to the start of their due date. Events resolve
    /// to their `from` field when it parses as `2026-02-01 1800` or as a
    /// bare `2026-02-01` (start of day). To-dos, and events whose `from`
    /// matches neither pattern, have no reminder instant.
    pub fn reminder_instant(&self) -> Option<NaiveDateTime> {
        match &self.kind {
            TaskKind::Todo => None,
            TaskKind::Deadline { by } => by.and_hms_opt(0, 0, 0),
            TaskKind::Event { from, .. } => parse_event_instant(from),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TaskKind::Todo => {
                write!(f, "[T] {} {}", self.status_icon(), self.description)
            }
            TaskKind::Deadline { by } => write!(
                f,
                "[D] {} {} (by: {})",
                self.status_icon(),
                self.description,
                by.format(HUMAN_DATE_FORMAT)
            ),
            TaskKind::Event { from, to } => write!(
                f,
                "[E] {} {} (from: {} to: {})",
                self.status_icon(),
                self.description,
                from,
                to
            ),
        }
    }
}

/// Parse an event `from` field into a reminder instant.
fn parse_event_instant(from: &str) -> Option<NaiveDateTime> {
    let s = from.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, EVENT_DATETIME_FORMAT) {
        return Some(dt);
    }
    NaiveDate::parse_from_str(s, EVENT_DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// An ordered list of tasks.
///
/// Insertion order is display and persistence order; mutation never
/// reorders. Indices are 0-based here; the user-facing boundary is
/// 1-based and the parser validates range before any indexed call, so an
/// out-of-range index is a caller bug and panics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task at the end.
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Get a task by 0-based index.
    pub fn get(&self, index: usize) -> &Task {
        &self.tasks[index]
    }

    /// Remove and return the task at the given 0-based index.
    pub fn remove(&mut self, index: usize) -> Task {
        self.tasks.remove(index)
    }

    /// Mark the task at the given 0-based index as done.
    pub fn mark(&mut self, index: usize) {
        self.tasks[index].mark();
    }

    /// Mark the task at the given 0-based index as not done.
    pub fn unmark(&mut self, index: usize) {
        self.tasks[index].unmark();
    }

    /// Number of tasks in the list.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Iterate over the tasks in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Tasks whose description contains `keyword`, case-insensitively.
    ///
    /// Substring match, original order preserved. An empty keyword
    /// matches every task.
    pub fn find_by_keyword(&self, keyword: &str) -> Vec<&Task> {
        let key = keyword.to_lowercase();
        self.tasks
            .iter()
            .filter(|t| t.description.to_lowercase().contains(&key))
            .collect()
    }

    /// Format all tasks as a numbered list, or `(no tasks yet)`.
    pub fn format_list(&self) -> String {
        if self.tasks.is_empty() {
            return "(no tasks yet)".to_string();
        }
        numbered(self.tasks.iter())
    }

    /// Format keyword matches as a numbered list, or `(no matching tasks)`.
    ///
    /// Numbering restarts from 1 over the matches, not the full list.
    pub fn format_matches(&self, keyword: &str) -> String {
        let matches = self.find_by_keyword(keyword);
        if matches.is_empty() {
            return "(no matching tasks)".to_string();
        }
        numbered(matches.into_iter())
    }

    /// Format tasks with a reminder instant in the next `days` days.
    ///
    /// Uses the local wall clock; see [`TaskList::format_upcoming_at`]
    /// for the window semantics.
    pub fn format_upcoming(&self, days: i64) -> String {
        self.format_upcoming_at(Local::now().naive_local(), days)
    }

    /// Format tasks whose reminder instant lies in `[now, now + days]`,
    /// both bounds inclusive, sorted ascending by instant and numbered
    /// from 1. Returns `(no upcoming tasks)` when none qualify.
    ///
    /// `days` must be positive; the parser enforces this before the call.
    pub fn format_upcoming_at(&self, now: NaiveDateTime, days: i64) -> String {
        let end = now + Duration::days(days);
        let mut upcoming: Vec<(NaiveDateTime, &Task)> = self
            .tasks
            .iter()
            .filter_map(|t| t.reminder_instant().map(|instant| (instant, t)))
            .filter(|(instant, _)| *instant >= now && *instant <= end)
            .collect();
        upcoming.sort_by_key(|(instant, _)| *instant);

        if upcoming.is_empty() {
            return "(no upcoming tasks)".to_string();
        }
        numbered(upcoming.into_iter().map(|(_, t)| t))
    }
}

/// Render tasks as `1. <task>` lines, joined without a trailing newline.
fn numbered<'a, I>(tasks: I) -> String
where
    I: Iterator<Item = &'a Task>,
{
    tasks
        .enumerate()
        .map(|(i, t)| format!("{}. {}", i + 1, t))
        .collect::<Vec<_>>()
        .join("\n")
}
