//! Severity levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Record key tagging facade records that were emitted as critical.
pub const SEVERITY_KEY: &str = "severity";

/// Severity of a context log line, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    /// Severity token as it appears at the front of a log line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// The `log` facade has no critical level; critical records are sent
    /// at `Error` and tagged with `severity=CRITICAL` (see `of_record`).
    pub fn to_log_level(self) -> log::Level {
        match self {
            Level::Debug => log::Level::Debug,
            Level::Info => log::Level::Info,
            Level::Warning => log::Level::Warn,
            Level::Error | Level::Critical => log::Level::Error,
        }
    }

    pub fn to_level_filter(self) -> log::LevelFilter {
        self.to_log_level().to_level_filter()
    }

    /// Severity of a facade record, recovering the critical tag.
    ///
    /// `Trace` records have no counterpart and read as `Debug`.
    pub fn of_record(record: &log::Record<'_>) -> Level {
        match record.level() {
            log::Level::Trace | log::Level::Debug => Level::Debug,
            log::Level::Info => Level::Info,
            log::Level::Warn => Level::Warning,
            log::Level::Error if is_critical(record) => Level::Critical,
            log::Level::Error => Level::Error,
        }
    }
}

fn is_critical(record: &log::Record<'_>) -> bool {
    record
        .key_values()
        .get(log::kv::Key::from_str(SEVERITY_KEY))
        .map_or(false, |value| value.to_string() == Level::Critical.as_str())
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warning" | "warn" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "critical" | "fatal" => Ok(Level::Critical),
            _ => Err(Error::InvalidLevel(s.to_string())),
        }
    }
}

impl From<Level> for log::Level {
    fn from(level: Level) -> Self {
        level.to_log_level()
    }
}
