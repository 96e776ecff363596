//! `env_logger` setup.

use std::fmt;
use std::io::Write;

use env_logger::WriteStyle;
use log::{Log, Metadata, Record};

use crate::error::{Error, Result};
use crate::logging::{Level, LOG_SEPARATOR};

/// Per-target filter directives, in `env_logger` syntax (`svc=debug,db=warn`).
pub const ENV_FILTER: &str = "CONTEXT_LOG";

/// Minimum level read by `LoggingConfig::from_env`.
pub const ENV_LEVEL: &str = "CONTEXT_LOG_LEVEL";

/// Global logging settings. Only the first successful `init` takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: Level,
    /// Prefix each line with a millisecond timestamp.
    pub timestamps: bool,
    /// Apply `CONTEXT_LOG` directives on top of `level`.
    pub env_override: bool,
    pub write_style: WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            timestamps: false,
            env_override: true,
            write_style: WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, with the level taken from `CONTEXT_LOG_LEVEL` when set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(level) = std::env::var(ENV_LEVEL) {
            config.level = level.parse()?;
        }
        Ok(config)
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    pub fn with_env_override(mut self, env_override: bool) -> Self {
        self.env_override = env_override;
        self
    }

    pub fn with_write_style(mut self, write_style: WriteStyle) -> Self {
        self.write_style = write_style;
        self
    }

    /// Build the `env_logger` builder without installing it.
    pub fn builder(&self) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();
        builder
            .filter_level(self.level.to_level_filter())
            .write_style(self.write_style);

        if self.env_override {
            if let Ok(directives) = std::env::var(ENV_FILTER) {
                builder.parse_filters(&directives);
            }
        }

        let timestamps = self.timestamps;
        builder.format(move |buf, record| {
            if timestamps {
                let ts = buf.timestamp_millis();
                write!(buf, "{} ", ts)?;
            }
            writeln!(buf, "{}", format_line(record_token(record), record.args()))
        });
        builder
    }

    /// Build the logger `init` would install.
    pub fn logger(&self) -> LineLogger {
        LineLogger::new(self.builder().build(), self.level)
    }

    /// Install the process-wide logger.
    ///
    /// Fails with `Error::AlreadyConfigured` if any `log` implementation
    /// is already installed; the existing configuration is kept.
    pub fn init(&self) -> Result<()> {
        let logger = self.logger();
        let max_level = logger.filter();
        log::set_boxed_logger(Box::new(logger)).map_err(|_| Error::AlreadyConfigured)?;
        log::set_max_level(max_level);

        log::debug!(
            "LOGGING_CONFIGURED level={} timestamps={} env_override={}",
            self.level,
            self.timestamps,
            self.env_override
        );
        Ok(())
    }
}

/// Configure process-wide logging at `level`. Call once at startup.
pub fn set_global_logging_config(level: Level) -> Result<()> {
    LoggingConfig::default().with_level(level).init()
}

/// `env_logger` with the critical threshold the facade cannot express.
///
/// Critical maps onto the facade's `Error`, so at a `Critical` minimum
/// plain error records pass the `env_logger` filter; they are dropped here.
#[derive(Debug)]
pub struct LineLogger {
    inner: env_logger::Logger,
    min_level: Level,
}

impl LineLogger {
    pub fn new(inner: env_logger::Logger, min_level: Level) -> Self {
        Self { inner, min_level }
    }

    pub fn filter(&self) -> log::LevelFilter {
        self.inner.filter()
    }
}

impl Log for LineLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if self.min_level == Level::Critical && Level::of_record(record) != Level::Critical {
            return;
        }
        self.inner.log(record)
    }

    fn flush(&self) {
        self.inner.flush()
    }
}

/// Severity token of a facade record.
pub fn record_token(record: &Record<'_>) -> &'static str {
    match record.level() {
        log::Level::Trace => "TRACE",
        _ => Level::of_record(record).as_str(),
    }
}

/// One output line: severity token, separator, message.
pub fn format_line(token: &str, message: impl fmt::Display) -> String {
    format!("{}{}{}", token, LOG_SEPARATOR, message)
}
