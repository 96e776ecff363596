//! Log emission backends.
//!
//! A backend is the externally-owned sink a `ContextLogger` writes to:
//! - `LogBackend` forwards to the process-wide `log` facade
//! - `MemoryBackend` captures records for test harnesses
//! - `BackendRegistry` hands out one shared backend per logger name

pub mod log_facade;
pub mod memory;
pub mod registry;

use std::fmt;

use serde_json::Value;

use crate::error::Result;
use crate::logging::Level;

pub use log_facade::LogBackend;
pub use memory::{MemoryBackend, MemoryRecord};
pub use registry::{
    get_backend, global_registry, reset_global_registry, set_global_registry, BackendFactory,
    BackendRegistry,
};

/// Backend-specific options forwarded unchanged with each emission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmitOptions {
    /// Overrides the record target; defaults to the backend name.
    pub target: Option<&'static str>,
    pub module_path: Option<&'static str>,
    pub file: Option<&'static str>,
    pub line: Option<u32>,
    /// Extra key-value fields for this record only; not added to the context.
    pub fields: Vec<(String, Value)>,
}

impl EmitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying a call site, as filled in by the `cx_*!` macros.
    pub fn at(module_path: &'static str, file: &'static str, line: u32) -> Self {
        Self {
            module_path: Some(module_path),
            file: Some(file),
            line: Some(line),
            ..Self::default()
        }
    }

    pub fn with_target(mut self, target: &'static str) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }
}

/// A named log sink.
///
/// Implementations must tolerate concurrent callers; several loggers
/// with the same name share one backend.
pub trait Backend: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Emit one already-annotated line. Errors propagate to the caller as-is.
    fn emit(&self, level: Level, text: &str, options: &EmitOptions) -> Result<()>;
}
