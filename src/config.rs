//! Configuration loading for jot.
//!
//! Supports jot.toml, CLI flags, and environment variables.
//! Precedence (highest to lowest): CLI flags > env vars > config file > defaults.

use std::env;
use std::fs;
use std::path::Path;

use crate::dispatcher::DEFAULT_REMIND_DAYS;

/// Jot configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the task save file.
    pub data_file: String,
    /// Directory for session log files.
    pub log_dir: String,
    /// Default window in days for `remind` with no argument.
    pub remind_days: i64,
    /// Colorize console replies.
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: "data/jot.txt".to_string(),
            log_dir: "data/log".to_string(),
            remind_days: DEFAULT_REMIND_DAYS,
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from all sources with proper precedence.
    ///
    /// Precedence: CLI args > env vars > config file > defaults. A
    /// missing or unparseable config file falls back to defaults.
    pub fn load(cli_args: &CliArgs) -> Self {
        let mut config = Self::default();

        // Load from config file if present
        if let Some(ref path) = cli_args.config {
            if let Ok(file_config) = Self::load_from_file(path) {
                config = file_config;
            }
        } else if Path::new("jot.toml").exists() {
            if let Ok(file_config) = Self::load_from_file("jot.toml") {
                config = file_config;
            }
        }

        config.apply_env();
        config.apply_cli(cli_args);
        config
    }

    /// Load configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::parse_toml(&content)
    }

    fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let mut current_section = String::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Handle section headers like [files]
            if line.starts_with('[') && line.ends_with(']') {
                current_section = line[1..line.len() - 1].to_string();
                continue;
            }

            if let Some((key, value)) = parse_toml_line(line) {
                // Build full key with section prefix
                let full_key = if current_section.is_empty() {
                    key.to_string()
                } else {
                    format!("{}.{}", current_section, key)
                };

                match full_key.as_str() {
                    "files.data" => {
                        config.data_file = value.trim_matches('"').to_string();
                    }
                    "files.log_dir" => {
                        config.log_dir = value.trim_matches('"').to_string();
                    }
                    "remind.days" => {
                        let days: i64 = value.parse().map_err(|_| {
                            ConfigError::Parse(format!("invalid remind.days: {}", value))
                        })?;
                        if days < 1 {
                            return Err(ConfigError::Parse(format!(
                                "remind.days must be positive: {}",
                                value
                            )));
                        }
                        config.remind_days = days;
                    }
                    "ui.color" => {
                        config.color = value != "false";
                    }
                    _ => {} // Ignore unknown keys
                }
            }
        }

        Ok(config)
    }

    /// Apply environment variables.
    fn apply_env(&mut self) {
        if let Ok(val) = env::var("JOT_DATA_FILE") {
            self.data_file = val;
        }
        if let Ok(val) = env::var("JOT_LOG_DIR") {
            self.log_dir = val;
        }
        if let Ok(val) = env::var("JOT_REMIND_DAYS") {
            if let Ok(n) = val.parse::<i64>() {
                if n > 0 {
                    self.remind_days = n;
                }
            }
        }
        if let Ok(val) = env::var("JOT_NO_COLOR") {
            if val == "true" || val == "1" {
                self.color = false;
            }
        }
    }

    /// Apply CLI arguments.
    fn apply_cli(&mut self, args: &CliArgs) {
        if let Some(ref file) = args.data_file {
            self.data_file = file.clone();
        }
        if let Some(ref dir) = args.log_dir {
            self.log_dir = dir.clone();
        }
        if let Some(days) = args.remind_days {
            self.remind_days = days;
        }
        if args.no_color {
            self.color = false;
        }
    }
}

/// Parsed command-line arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Show help and exit.
    pub help: bool,
    /// Show version and exit.
    pub version: bool,
    /// Path to config file.
    pub config: Option<String>,
    /// Path to the task save file.
    pub data_file: Option<String>,
    /// Path to the session log directory.
    pub log_dir: Option<String>,
    /// Default `remind` window in days.
    pub remind_days: Option<i64>,
    /// Disable colored output.
    pub no_color: bool,
}

/// Parse CLI arguments from an iterator.
pub fn parse_args<I>(args: I) -> CliArgs
where
    I: IntoIterator<Item = String>,
{
    let mut cli = CliArgs::default();
    let mut args = args.into_iter();

    // Skip program name
    args.next();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => cli.help = true,
            "-V" | "--version" => cli.version = true,
            "-c" | "--config" => cli.config = args.next(),
            "-f" | "--file" => cli.data_file = args.next(),
            "--log-dir" => cli.log_dir = args.next(),
            "--remind-days" => {
                cli.remind_days = args.next().and_then(|s| s.parse().ok()).filter(|&n| n > 0);
            }
            "--no-color" => cli.no_color = true,
            _ => {} // Ignore unknown flags
        }
    }

    cli
}

/// Parse a TOML line into key-value pair.
fn parse_toml_line(line: &str) -> Option<(&str, &str)> {
    let parts: Vec<&str> = line.splitn(2, '=').collect();
    if parts.len() != 2 {
        return None;
    }
    Some((parts[0].trim(), parts[1].trim()))
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading config file.
    Io(String),
    /// Parse error in config file.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "config I/O error: {}", msg),
            Self::Parse(msg) => write!(f, "config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
