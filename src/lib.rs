//! Context Logger - key-value context on every log line
//!
//! A `ContextLogger` wraps a named logging backend and prefixes each
//! message with its context mapping, so downstream lines carry fields
//! such as the module name or a request id without every call site
//! repeating them:
//!
//! ```text
//! INFO::{name: "svc", request: 7}::started
//! ```
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `logging` - `ContextLogger`, `Context`, `Level` and the `cx_*!` macros
//! - `backend` - backend trait, `log`-facade and in-memory backends, name-keyed registry
//! - `config` - process-wide `env_logger` setup
//! - `error` - crate error type
//!
//! ## Usage
//!
//! ```no_run
//! use context_logger::{set_global_logging_config, ContextLogger, Level};
//!
//! # fn main() -> context_logger::Result<()> {
//! set_global_logging_config(Level::Info)?;
//!
//! let mut logger = ContextLogger::new("svc");
//! logger.set_context("request", 7)?;
//! logger.info("started")?;
//!
//! let child = ContextLogger::inherit("svc.db", &logger);
//! child.debug("connecting")?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod logging;

pub use backend::{get_backend, Backend, BackendRegistry, EmitOptions, LogBackend, MemoryBackend};
pub use config::{set_global_logging_config, LoggingConfig};
pub use error::{Error, Result};
pub use logging::{Context, ContextLogger, Level, DEFAULT_NAME, LOG_SEPARATOR, NAME_KEY};
