//! Terminal color utilities using ANSI escape codes.
//!
//! Provides colored output for replies, keyed by command category, plus
//! banner and error helpers for the console shell.

use crate::dispatcher::CommandKind;

/// ANSI color codes
pub mod codes {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
}

use codes::*;

/// Get the color for a reply based on the command category.
pub fn kind_color(kind: CommandKind) -> &'static str {
    match kind {
        CommandKind::Add => GREEN,
        CommandKind::Mark => CYAN,
        CommandKind::Delete => YELLOW,
        CommandKind::Find => MAGENTA,
        CommandKind::List => BLUE,
        CommandKind::Bye => CYAN,
        CommandKind::Error | CommandKind::Unknown => RED,
        CommandKind::Other => DIM,
    }
}

/// Wrap text in a color code.
pub fn paint(text: &str, color: &str) -> String {
    format!("{}{}{}", color, text, RESET)
}

/// Color a reply by its command category.
pub fn reply(text: &str, kind: CommandKind) -> String {
    paint(text, kind_color(kind))
}

/// Color a banner (bold).
pub fn banner(text: &str) -> String {
    format!("{}{}{}", BOLD, text, RESET)
}

/// Color the input prompt (dim).
pub fn prompt(text: &str) -> String {
    format!("{}{}{}", DIM, text, RESET)
}
