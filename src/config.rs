//! Runtime configuration read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `ADIPOSCOPE_LOG_MODE` | `auto` (file on a TTY, stdout otherwise) |
//! | `ADIPOSCOPE_LOG_FILE` | `adiposcope.log` |
//! | `ADIPOSCOPE_EXPORT_DIR` | `.` |
//!
//! `ADIPOSCOPE_SANITIZE_MAX_BYTES` is read by the log sanitizer directly.

use std::path::PathBuf;

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise
    #[default]
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve to "write to file?" given whether stdout is interactive.
    ///
    /// Logs written to the terminal would corrupt the TUI's alternate screen.
    #[must_use]
    pub fn uses_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_mode: LogMode::Auto,
            log_file: PathBuf::from("adiposcope.log"),
            export_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            log_mode: non_empty("ADIPOSCOPE_LOG_MODE")
                .map(|v| LogMode::parse(&v))
                .unwrap_or(defaults.log_mode),
            log_file: non_empty("ADIPOSCOPE_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
            export_dir: non_empty("ADIPOSCOPE_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir),
        }
    }
}
