//! Jot: a single-user, line-oriented task manager.
//!
//! Tasks come in three kinds (todo, deadline, event) and live in a plain
//! text file between runs:
//! - `data/jot.txt` - one task per line, `T | 0 | read book` style
//! - `jot.toml` - optional configuration
//! - `data/log/` - session logs
//!
//! The core is the [`dispatcher::Dispatcher`]: a front-end (the console
//! loop in `main.rs`, or anything else that can read and print lines)
//! hands it one line of input and relays the reply string to the user.
//! The dispatcher owns the task list, delegates parsing to [`parser`],
//! and rewrites the save file through [`storage`] after every mutation.

pub mod color;
pub mod config;
pub mod dispatcher;
pub mod log;
pub mod parser;
pub mod storage;
pub mod task;
