//! Process-wide logging configuration.
//!
//! Installs `env_logger` as the `log` implementation behind every
//! `LogBackend`, with lines shaped `SEVERITY::{context}::message`.

pub mod setup;

pub use setup::{
    format_line, record_token, set_global_logging_config, LineLogger, LoggingConfig, ENV_FILTER,
    ENV_LEVEL,
};
