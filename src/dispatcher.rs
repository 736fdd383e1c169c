//! Command dispatch: one line of input in, one reply string out.
//!
//! The dispatcher owns the task list and the storage behind it. Each
//! call to [`Dispatcher::process`] runs exactly one command to
//! completion - parse, mutate, persist, reply - before returning.
//! Front-ends only ever see the list through this request/reply surface.

use std::path::Path;

use crate::parser::{self, FormatError};
use crate::storage::Storage;
use crate::task::{Task, TaskList};

/// Default `remind` window in days when no argument is given.
pub const DEFAULT_REMIND_DAYS: i64 = 7;

/// Greeting shown by front-ends before the first command.
pub const WELCOME: &str = "Hello! I'm Jot.\nWhat can I do for you?";

const FAREWELL: &str = "Bye. Hope to see you again soon!";

/// Marker prefixed to every reply that stems from a recognized failure,
/// so callers can tell success from user error.
const ERROR_PREFIX: &str = "OOPS!!!";

/// Coarse category of the most recent command.
///
/// Observable state for the presentation layer only (a front-end might
/// color replies by category); nothing inside the core reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandKind {
    /// `todo`, `deadline`, `event`.
    Add,
    /// `mark`, `unmark`.
    Mark,
    /// `delete`.
    Delete,
    /// `find`.
    Find,
    /// `list`.
    List,
    /// `bye`.
    Bye,
    /// Input that failed parsing or validation.
    Error,
    /// An unrecognized command word.
    Unknown,
    /// Anything else (`remind`, and the state before the first command).
    #[default]
    Other,
}

impl CommandKind {
    /// Lowercase label, used for log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Mark => "mark",
            Self::Delete => "delete",
            Self::Find => "find",
            Self::List => "list",
            Self::Bye => "bye",
            Self::Error => "error",
            Self::Unknown => "unknown",
            Self::Other => "other",
        }
    }
}

/// Owns the task list and runs one command per call.
pub struct Dispatcher {
    tasks: TaskList,
    storage: Storage,
    default_remind_days: i64,
    last_kind: CommandKind,
}

impl Dispatcher {
    /// Create a dispatcher backed by the given save file, loading any
    /// previously saved tasks. A missing file starts an empty list.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let storage = Storage::new(path.as_ref());
        let tasks = storage.load();
        Self {
            tasks,
            storage,
            default_remind_days: DEFAULT_REMIND_DAYS,
            last_kind: CommandKind::default(),
        }
    }

    /// Override the default `remind` window.
    pub fn with_default_remind_days(mut self, days: i64) -> Self {
        self.default_remind_days = days;
        self
    }

    /// Category of the most recently processed command.
    pub fn last_kind(&self) -> CommandKind {
        self.last_kind
    }

    /// Number of tasks currently held.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Process one line of input and return the reply text.
    ///
    /// Never fails on user input: recognized failures come back as
    /// `OOPS!!!`-prefixed replies. A [`CommandKind::Bye`] result tells
    /// the caller to stop its loop; the dispatcher itself never exits.
    pub fn process(&mut self, input: &str) -> String {
        match self.dispatch(input.trim()) {
            Ok((reply, kind)) => {
                self.last_kind = kind;
                reply
            }
            Err(e) => {
                self.last_kind = CommandKind::Error;
                format!("{} {}", ERROR_PREFIX, e)
            }
        }
    }

    fn dispatch(&mut self, input: &str) -> Result<(String, CommandKind), FormatError> {
        if input.is_empty() {
            return Err(FormatError::new("Please type a command!"));
        }

        // ASCII lowercasing keeps the token the same byte length, so the
        // parser's offset-based slicing stays on char boundaries.
        let word = input
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match word.as_str() {
            "mark" => {
                let n = parser::parse_task_number(input, "mark")?;
                let index = parser::validate_task_number(n, self.tasks.len())?;
                self.tasks.mark(index);
                self.save();
                Ok((
                    format!(
                        "Nice! I've marked this task as done:\n  {}",
                        self.tasks.get(index)
                    ),
                    CommandKind::Mark,
                ))
            }
            "unmark" => {
                let n = parser::parse_task_number(input, "unmark")?;
                let index = parser::validate_task_number(n, self.tasks.len())?;
                self.tasks.unmark(index);
                self.save();
                Ok((
                    format!(
                        "OK, I've marked this task as not done yet:\n  {}",
                        self.tasks.get(index)
                    ),
                    CommandKind::Mark,
                ))
            }
            "todo" => self.add_task(parser::parse_todo(input)?),
            "deadline" => self.add_task(parser::parse_deadline(input)?),
            "event" => self.add_task(parser::parse_event(input)?),
            "delete" => {
                let n = parser::parse_task_number(input, "delete")?;
                let index = parser::validate_task_number(n, self.tasks.len())?;
                let removed = self.tasks.remove(index);
                self.save();
                Ok((
                    format!(
                        "Noted. I've removed this task:\n  {}\nNow you have {} tasks in the list.",
                        removed,
                        self.tasks.len()
                    ),
                    CommandKind::Delete,
                ))
            }
            "find" => {
                let keyword = parser::parse_find(input)?;
                Ok((self.tasks.format_matches(&keyword), CommandKind::Find))
            }
            "remind" => {
                let days = parser::parse_remind(input, self.default_remind_days)?;
                Ok((self.tasks.format_upcoming(days), CommandKind::Other))
            }
            // `list` and `bye` take no arguments; with trailing text they
            // fall through to the unknown-command reply.
            "list" if input.eq_ignore_ascii_case("list") => {
                Ok((self.tasks.format_list(), CommandKind::List))
            }
            "bye" if input.eq_ignore_ascii_case("bye") => {
                Ok((FAREWELL.to_string(), CommandKind::Bye))
            }
            _ => Ok((
                format!("{} I do not understand what you are saying :'(", ERROR_PREFIX),
                CommandKind::Unknown,
            )),
        }
    }

    fn add_task(&mut self, task: Task) -> Result<(String, CommandKind), FormatError> {
        let rendered = task.to_string();
        self.tasks.add(task);
        self.save();
        Ok((
            format!(
                "Got it. I've added this task:\n  {}\nNow you have {} tasks in the list.",
                rendered,
                self.tasks.len()
            ),
            CommandKind::Add,
        ))
    }

    // A failed save is ignored; the in-memory list stays the source of
    // truth for the rest of the session.
    fn save(&self) {
        let _ = self.storage.save(&self.tasks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn dispatcher(dir: &TempDir) -> Dispatcher {
        Dispatcher::new(dir.path().join("jot.txt"))
    }

    #[test]
    fn test_add_todo_reports_count() {
        let dir = TempDir::new().unwrap();
        let mut d = dispatcher(&dir);

        let reply = d.process("todo read book");
        assert_eq!(
            reply,
            "Got it. I've added this task:\n  [T] [ ] read book\nNow you have 1 tasks in the list."
        );
        assert_eq!(d.last_kind(), CommandKind::Add);
        assert_eq!(d.task_count(), 1);
    }

    #[test]
    fn test_command_word_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let mut d = dispatcher(&dir);

        d.process("TODO read book");
        assert_eq!(d.last_kind(), CommandKind::Add);
        assert_eq!(d.task_count(), 1);
    }

    #[test]
    fn test_mark_and_unmark() {
        let dir = TempDir::new().unwrap();
        let mut d = dispatcher(&dir);
        d.process("todo read book");

        let reply = d.process("mark 1");
        assert_eq!(
            reply,
            "Nice! I've marked this task as done:\n  [T] [X] read book"
        );
        assert_eq!(d.last_kind(), CommandKind::Mark);

        let reply = d.process("unmark 1");
        assert_eq!(
            reply,
            "OK, I've marked this task as not done yet:\n  [T] [ ] read book"
        );
        assert_eq!(d.last_kind(), CommandKind::Mark);
    }

    #[test]
    fn test_mark_out_of_range_is_an_error_reply() {
        let dir = TempDir::new().unwrap();
        let mut d = dispatcher(&dir);

        let reply = d.process("mark 1");
        assert_eq!(reply, "OOPS!!! That task number does not exist :P");
        assert_eq!(d.last_kind(), CommandKind::Error);
    }

    #[test]
    fn test_delete_reports_removed_task_and_count() {
        let dir = TempDir::new().unwrap();
        let mut d = dispatcher(&dir);
        d.process("todo A");
        d.process("todo B");

        let reply = d.process("delete 1");
        assert_eq!(
            reply,
            "Noted. I've removed this task:\n  [T] [ ] A\nNow you have 1 tasks in the list."
        );
        assert_eq!(d.last_kind(), CommandKind::Delete);
        assert_eq!(d.task_count(), 1);
    }

    #[test]
    fn test_list_formats_all_tasks() {
        let dir = TempDir::new().unwrap();
        let mut d = dispatcher(&dir);
        assert_eq!(d.process("list"), "(no tasks yet)");

        d.process("todo read book");
        d.process("deadline return book /by 2026-02-01");
        assert_eq!(
            d.process("list"),
            "1. [T] [ ] read book\n2. [D] [ ] return book (by: Feb 01 2026)"
        );
        assert_eq!(d.last_kind(), CommandKind::List);
    }

    #[test]
    fn test_find_replies_with_matches() {
        let dir = TempDir::new().unwrap();
        let mut d = dispatcher(&dir);
        d.process("todo read book");
        d.process("todo buy milk");

        assert_eq!(d.process("find book"), "1. [T] [ ] read book");
        assert_eq!(d.last_kind(), CommandKind::Find);
        assert_eq!(d.process("find cheese"), "(no matching tasks)");
    }

    #[test]
    fn test_remind_kind_is_other() {
        let dir = TempDir::new().unwrap();
        let mut d = dispatcher(&dir);

        assert_eq!(d.process("remind"), "(no upcoming tasks)");
        assert_eq!(d.last_kind(), CommandKind::Other);
    }

    #[test]
    fn test_bye_signals_caller() {
        let dir = TempDir::new().unwrap();
        let mut d = dispatcher(&dir);

        assert_eq!(d.process("bye"), "Bye. Hope to see you again soon!");
        assert_eq!(d.last_kind(), CommandKind::Bye);
    }

    #[test]
    fn test_unknown_command() {
        let dir = TempDir::new().unwrap();
        let mut d = dispatcher(&dir);

        let reply = d.process("blah");
        assert_eq!(reply, "OOPS!!! I do not understand what you are saying :'(");
        assert_eq!(d.last_kind(), CommandKind::Unknown);
    }

    #[test]
    fn test_list_with_arguments_is_unknown() {
        let dir = TempDir::new().unwrap();
        let mut d = dispatcher(&dir);
        d.process("todo read book");

        d.process("list everything");
        assert_eq!(d.last_kind(), CommandKind::Unknown);
        d.process("bye bye");
        assert_eq!(d.last_kind(), CommandKind::Unknown);
    }

    #[test]
    fn test_blank_input_is_an_error_reply() {
        let dir = TempDir::new().unwrap();
        let mut d = dispatcher(&dir);

        assert_eq!(d.process("   "), "OOPS!!! Please type a command!");
        assert_eq!(d.last_kind(), CommandKind::Error);
    }

    #[test]
    fn test_format_errors_become_error_replies() {
        let dir = TempDir::new().unwrap();
        let mut d = dispatcher(&dir);

        assert_eq!(d.process("delete abc"), "OOPS!!! Sorry! I need a task number!");
        assert_eq!(d.last_kind(), CommandKind::Error);
        assert_eq!(
            d.process("deadline return book /by not-a-date"),
            "OOPS!!! Wrong format! Date must be yyyy-MM-dd!"
        );
        assert_eq!(d.process("todo"), "OOPS!!! I did not receive a task :(");
    }

    #[test]
    fn test_mutations_persist_immediately() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jot.txt");

        let mut d = Dispatcher::new(&path);
        d.process("todo read book");
        assert_eq!(fs::read_to_string(&path).unwrap(), "T | 0 | read book\n");

        d.process("mark 1");
        assert_eq!(fs::read_to_string(&path).unwrap(), "T | 1 | read book\n");
    }

    #[test]
    fn test_new_dispatcher_reloads_saved_tasks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jot.txt");

        let mut d = Dispatcher::new(&path);
        d.process("todo read book");
        d.process("event standup /from 2026-02-01 0900 /to 2026-02-01 0915");
        drop(d);

        let mut d = Dispatcher::new(&path);
        assert_eq!(d.task_count(), 2);
        assert_eq!(
            d.process("list"),
            "1. [T] [ ] read book\n\
             2. [E] [ ] standup (from: 2026-02-01 0900 to: 2026-02-01 0915)"
        );
    }

    #[test]
    fn test_custom_remind_default() {
        let dir = TempDir::new().unwrap();
        let mut d = dispatcher(&dir).with_default_remind_days(1);

        // Window parsing is the parser's job; here only the default
        // plumbing is exercised.
        assert_eq!(d.process("remind"), "(no upcoming tasks)");
        assert_eq!(d.process("remind 0"), "OOPS!!! Days must be a positive integer!");
        assert_eq!(d.process("remind 1 2"), "OOPS!!! Usage: remind [days]");
    }
}
