//! Command parsing and validation.
//!
//! Each function turns part of one raw input line into typed data (a
//! task, a task number, a keyword, a reminder window) or fails with a
//! [`FormatError`] carrying the exact message shown to the user. Nothing
//! here touches storage or the task list; range validation only needs
//! the list length.
//!
//! Every extraction function takes the full input line and assumes it
//! begins with the relevant command word - the dispatcher matches the
//! word before calling in.

use std::fmt;

use chrono::NaiveDate;

use crate::task::{Task, DATE_FORMAT};

/// Separator between a deadline description and its date.
const BY_SEPARATOR: &str = " /by ";
/// Separators between an event description and its start/end fields.
const FROM_SEPARATOR: &str = " /from ";
const TO_SEPARATOR: &str = " /to ";

/// User-facing input error. The message is shown verbatim in the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    message: String,
}

impl FormatError {
    /// Create a format error with the given user-facing message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FormatError {}

/// Extract the task number from commands like `delete 3` or `mark 2`.
///
/// Takes the remainder after the command word, trims it, and parses it
/// as an integer. Parse failure surfaces before any range check runs.
pub fn parse_task_number(input: &str, command_word: &str) -> Result<i64, FormatError> {
    let rest = input[command_word.len()..].trim();
    rest.parse::<i64>()
        .map_err(|_| FormatError::new("Sorry! I need a task number!"))
}

/// Check a 1-based task number against the current list length and
/// return the 0-based index.
///
/// Shared by `mark`, `unmark`, and `delete`.
pub fn validate_task_number(task_num: i64, len: usize) -> Result<usize, FormatError> {
    if task_num < 1 || task_num > len as i64 {
        return Err(FormatError::new("That task number does not exist :P"));
    }
    Ok((task_num - 1) as usize)
}

/// Parse a `todo <description>` command into a task.
pub fn parse_todo(input: &str) -> Result<Task, FormatError> {
    let description = input["todo".len()..].trim();
    if description.is_empty() {
        return Err(FormatError::new("I did not receive a task :("));
    }
    Ok(Task::todo(description))
}

/// Parse a `deadline <description> /by <yyyy-MM-dd>` command into a task.
pub fn parse_deadline(input: &str) -> Result<Task, FormatError> {
    let rest = input["deadline".len()..].trim();
    let (description, date_str) = rest
        .split_once(BY_SEPARATOR)
        .ok_or_else(|| FormatError::new("Wrong deadline format!"))?;

    let description = description.trim();
    if description.is_empty() {
        return Err(FormatError::new("Wrong deadline format!"));
    }

    let by = NaiveDate::parse_from_str(date_str.trim(), DATE_FORMAT)
        .map_err(|_| FormatError::new("Wrong format! Date must be yyyy-MM-dd!"))?;

    Ok(Task::deadline(description, by))
}

/// Parse an `event <description> /from <start> /to <end>` command into a
/// task. The start and end stay free-form strings.
pub fn parse_event(input: &str) -> Result<Task, FormatError> {
    let rest = input["event".len()..].trim();
    let (description, times) = rest
        .split_once(FROM_SEPARATOR)
        .ok_or_else(|| FormatError::new("Wrong event format!"))?;
    let (from, to) = times
        .split_once(TO_SEPARATOR)
        .ok_or_else(|| FormatError::new("Wrong event format!"))?;

    let description = description.trim();
    if description.is_empty() {
        return Err(FormatError::new("Wrong event format!"));
    }

    Ok(Task::event(description, from.trim(), to.trim()))
}

/// Parse a `find <keyword>` command into the search keyword.
pub fn parse_find(input: &str) -> Result<String, FormatError> {
    let keyword = input["find".len()..].trim();
    if keyword.is_empty() {
        return Err(FormatError::new("Find what?"));
    }
    Ok(keyword.to_string())
}

/// Parse a `remind [days]` command into a day count.
///
/// No argument falls back to `default_days`; one argument must be a
/// positive integer; anything more is a usage error.
pub fn parse_remind(input: &str, default_days: i64) -> Result<i64, FormatError> {
    let rest = input["remind".len()..].trim();
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    match tokens.as_slice() {
        [] => Ok(default_days),
        [days] => match days.parse::<i64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(FormatError::new("Days must be a positive integer!")),
        },
        _ => Err(FormatError::new("Usage: remind [days]")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskKind;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_task_number_valid() {
        assert_eq!(parse_task_number("delete 3", "delete").unwrap(), 3);
        assert_eq!(parse_task_number("mark 1", "mark").unwrap(), 1);
    }

    #[test]
    fn test_parse_task_number_non_number() {
        let err = parse_task_number("delete abc", "delete").unwrap_err();
        assert_eq!(err.to_string(), "Sorry! I need a task number!");
    }

    #[test]
    fn test_parse_task_number_missing() {
        assert!(parse_task_number("delete", "delete").is_err());
    }

    #[test]
    fn test_parse_task_number_negative_parses() {
        // Negative numbers are the range check's problem, not the parser's.
        assert_eq!(parse_task_number("delete -1", "delete").unwrap(), -1);
    }

    #[test]
    fn test_validate_task_number_in_range() {
        assert_eq!(validate_task_number(1, 3).unwrap(), 0);
        assert_eq!(validate_task_number(3, 3).unwrap(), 2);
    }

    #[test]
    fn test_validate_task_number_out_of_range() {
        let err = validate_task_number(1, 0).unwrap_err();
        assert_eq!(err.to_string(), "That task number does not exist :P");
        assert!(validate_task_number(4, 3).is_err());
        assert!(validate_task_number(0, 3).is_err());
        assert!(validate_task_number(-1, 3).is_err());
    }

    #[test]
    fn test_parse_todo_valid() {
        let task = parse_todo("todo read book").unwrap();
        assert_eq!(task.description, "read book");
        assert_eq!(task.kind, TaskKind::Todo);
        assert!(!task.done);
    }

    #[test]
    fn test_parse_todo_blank_description() {
        let err = parse_todo("todo   ").unwrap_err();
        assert_eq!(err.to_string(), "I did not receive a task :(");
    }

    #[test]
    fn test_parse_deadline_valid() {
        let task = parse_deadline("deadline return book /by 2026-02-01").unwrap();
        assert_eq!(task.description, "return book");
        assert_eq!(
            task.kind,
            TaskKind::Deadline {
                by: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
            }
        );
        assert_eq!(task.to_string(), "[D] [ ] return book (by: Feb 01 2026)");
    }

    #[test]
    fn test_parse_deadline_missing_separator() {
        let err = parse_deadline("deadline return book by tomorrow").unwrap_err();
        assert_eq!(err.to_string(), "Wrong deadline format!");
    }

    #[test]
    fn test_parse_deadline_invalid_date() {
        let err = parse_deadline("deadline return book /by not-a-date").unwrap_err();
        assert_eq!(err.to_string(), "Wrong format! Date must be yyyy-MM-dd!");
    }

    #[test]
    fn test_parse_deadline_splits_on_first_by() {
        // The description stops at the first separator; everything after
        // it must be the date in one piece.
        let err = parse_deadline("deadline drop /by box /by 2026-02-01").unwrap_err();
        assert_eq!(err.to_string(), "Wrong format! Date must be yyyy-MM-dd!");
    }

    #[test]
    fn test_parse_event_valid() {
        let task = parse_event("event project meeting /from Mon 2pm /to Mon 4pm").unwrap();
        assert_eq!(task.description, "project meeting");
        assert_eq!(
            task.kind,
            TaskKind::Event {
                from: "Mon 2pm".to_string(),
                to: "Mon 4pm".to_string()
            }
        );
    }

    #[test]
    fn test_parse_event_missing_from() {
        let err = parse_event("event meeting /to Mon 4pm").unwrap_err();
        assert_eq!(err.to_string(), "Wrong event format!");
    }

    #[test]
    fn test_parse_event_missing_to() {
        let err = parse_event("event meeting /from Mon 2pm").unwrap_err();
        assert_eq!(err.to_string(), "Wrong event format!");
    }

    #[test]
    fn test_parse_find_valid() {
        assert_eq!(parse_find("find book").unwrap(), "book");
    }

    #[test]
    fn test_parse_find_blank() {
        let err = parse_find("find  ").unwrap_err();
        assert_eq!(err.to_string(), "Find what?");
    }

    #[test]
    fn test_parse_remind_no_argument_uses_default() {
        assert_eq!(parse_remind("remind", 7).unwrap(), 7);
        assert_eq!(parse_remind("remind  ", 14).unwrap(), 14);
    }

    #[test]
    fn test_parse_remind_explicit_days() {
        assert_eq!(parse_remind("remind 3", 7).unwrap(), 3);
    }

    #[test]
    fn test_parse_remind_rejects_non_positive() {
        let err = parse_remind("remind 0", 7).unwrap_err();
        assert_eq!(err.to_string(), "Days must be a positive integer!");
        assert!(parse_remind("remind -2", 7).is_err());
        assert!(parse_remind("remind soon", 7).is_err());
    }

    #[test]
    fn test_parse_remind_rejects_extra_tokens() {
        let err = parse_remind("remind 3 4", 7).unwrap_err();
        assert_eq!(err.to_string(), "Usage: remind [days]");
    }
}
