//! Contextual logging.
//!
//! A `ContextLogger` carries a key-value `Context` and prefixes every
//! message with it, so log lines read `SEVERITY::{name: "svc", ...}::message`.

pub mod context;
pub mod level;
pub mod logger;
pub mod structured;

pub use context::{Context, ValueDisplay, DEFAULT_NAME, LOG_SEPARATOR, NAME_KEY};
pub use level::Level;
pub use logger::ContextLogger;
