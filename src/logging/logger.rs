//! The context logger.
//!
//! `ContextLogger` decorates a named backend: every message it emits is
//! prefixed with its rendered context, `{name: "svc", request: 7}::message`.
//!
//! The context is private to each instance. A logger built from another
//! logger (or from a bare `Context`) copies the source's context once at
//! construction, so later changes on either side never reach the other.
//!
//! Setting a key that already exists logs a warning through the same
//! logger before the value is replaced. That warning is a real emission:
//! it carries the old context and counts as a record on the backend.
//!
//! Mutation takes `&mut self`; a logger shared across threads must be
//! wrapped (e.g. in a mutex) by the caller.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::backend::{global_registry, Backend, BackendRegistry, EmitOptions};
use crate::error::Result;

use super::context::{Context, ValueDisplay, DEFAULT_NAME, NAME_KEY};
use super::level::Level;

#[derive(Clone)]
pub struct ContextLogger {
    name: String,
    context: Context,
    backend: Arc<dyn Backend>,
}

impl ContextLogger {
    /// Logger with an empty context, backed by the process-wide registry.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_registry(&global_registry(), name, None)
    }

    /// Logger whose context starts as a copy of `source`'s context.
    ///
    /// `source` may be another `ContextLogger` or a bare `Context`. The
    /// name entry is then replaced without a warning.
    pub fn inherit<S>(name: impl Into<String>, source: &S) -> Self
    where
        S: AsRef<Context> + ?Sized,
    {
        Self::with_registry(&global_registry(), name, Some(source.as_ref()))
    }

    /// Like `new`/`inherit`, resolving the backend in `registry`.
    pub fn with_registry(
        registry: &BackendRegistry,
        name: impl Into<String>,
        source: Option<&Context>,
    ) -> Self {
        let name = name.into();
        let mut context = source.cloned().unwrap_or_default();
        context.insert(NAME_KEY, name.as_str());

        Self {
            backend: registry.get(&name),
            name,
            context,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    /// Set `key` to `value`, warning first if the key is already present.
    ///
    /// A duplicate key is not an error. If the warning itself cannot be
    /// emitted, the backend error is returned and the context is unchanged.
    pub fn set_context(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        self.set_context_inner(key.into(), value.into(), true)
    }

    /// Set `key` to `value` without the duplicate-key warning.
    pub fn set_context_quiet(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.context.insert(key, value);
    }

    /// Set `key` to the JSON form of any serializable value.
    pub fn set_context_serialized<T>(&mut self, key: impl Into<String>, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(value)?;
        self.set_context_inner(key.into(), value, true)
    }

    fn set_context_inner(&mut self, key: String, value: Value, warn_on_existing: bool) -> Result<()> {
        if warn_on_existing {
            if let Some(old) = self.context.get(&key) {
                let message = format!(
                    "Setting existing key in context, key={} with value={} -> {}",
                    key,
                    ValueDisplay(old),
                    ValueDisplay(&value)
                );
                self.warning(&message)?;
            }
        }

        self.context.insert(key, value);
        Ok(())
    }

    /// Emit `message` at `level`, annotated with the current context.
    pub fn log(&self, level: Level, message: &str, options: &EmitOptions) -> Result<()> {
        let text = self.context.annotate(message);
        self.backend.emit(level, &text, options)
    }

    pub fn debug(&self, message: &str) -> Result<()> {
        self.log(Level::Debug, message, &EmitOptions::default())
    }

    pub fn info(&self, message: &str) -> Result<()> {
        self.log(Level::Info, message, &EmitOptions::default())
    }

    pub fn warning(&self, message: &str) -> Result<()> {
        self.log(Level::Warning, message, &EmitOptions::default())
    }

    pub fn error(&self, message: &str) -> Result<()> {
        self.log(Level::Error, message, &EmitOptions::default())
    }

    pub fn critical(&self, message: &str) -> Result<()> {
        self.log(Level::Critical, message, &EmitOptions::default())
    }

    pub fn debug_with(&self, message: &str, options: &EmitOptions) -> Result<()> {
        self.log(Level::Debug, message, options)
    }

    pub fn info_with(&self, message: &str, options: &EmitOptions) -> Result<()> {
        self.log(Level::Info, message, options)
    }

    pub fn warning_with(&self, message: &str, options: &EmitOptions) -> Result<()> {
        self.log(Level::Warning, message, options)
    }

    pub fn error_with(&self, message: &str, options: &EmitOptions) -> Result<()> {
        self.log(Level::Error, message, options)
    }

    pub fn critical_with(&self, message: &str, options: &EmitOptions) -> Result<()> {
        self.log(Level::Critical, message, options)
    }
}

impl Default for ContextLogger {
    fn default() -> Self {
        Self::new(DEFAULT_NAME)
    }
}

impl AsRef<Context> for ContextLogger {
    fn as_ref(&self) -> &Context {
        &self.context
    }
}

impl fmt::Debug for ContextLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextLogger")
            .field("name", &self.name)
            .field("context", &self.context)
            .field("backend", &self.backend.name())
            .finish()
    }
}
