//! Name-keyed backend registry.
//!
//! Loggers never own their backend: they look it up by name, and every
//! logger with the same name gets the same shared instance. The
//! process-wide registry can be swapped out so tests get isolated sinks.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::RwLock;

use super::{Backend, LogBackend};

/// Creates the backend for a name on first lookup.
pub type BackendFactory = Arc<dyn Fn(&str) -> Arc<dyn Backend> + Send + Sync>;

pub struct BackendRegistry {
    factory: BackendFactory,
    backends: RwLock<HashMap<String, Arc<dyn Backend>>>,
}

impl BackendRegistry {
    /// Registry creating `LogBackend`s.
    pub fn new() -> Self {
        Self::with_factory(|name| Arc::new(LogBackend::new(name)) as Arc<dyn Backend>)
    }

    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn(&str) -> Arc<dyn Backend> + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(factory),
            backends: RwLock::new(HashMap::new()),
        }
    }

    /// Look up the backend for `name`, creating it if needed.
    ///
    /// Repeated lookups return the same `Arc`.
    pub fn get(&self, name: &str) -> Arc<dyn Backend> {
        if let Some(backend) = self.backends.read().get(name) {
            return Arc::clone(backend);
        }

        let mut backends = self.backends.write();
        // Another caller may have won the race between the two locks.
        if let Some(backend) = backends.get(name) {
            return Arc::clone(backend);
        }
        let backend = (self.factory)(name);
        backends.insert(name.to_string(), Arc::clone(&backend));
        drop(backends);

        log::debug!("BACKEND_REGISTERED name={}", name);
        backend
    }

    /// Register `backend` under `name`, replacing any existing one.
    ///
    /// Loggers already holding the old backend keep using it.
    pub fn insert<B>(&self, name: &str, backend: B) -> Option<Arc<dyn Backend>>
    where
        B: Backend + 'static,
    {
        self.backends
            .write()
            .insert(name.to_string(), Arc::new(backend))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.backends.read().contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.backends.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.backends.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.read().is_empty()
    }

    pub fn clear(&self) {
        self.backends.write().clear();
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("backends", &self.names())
            .finish_non_exhaustive()
    }
}

// Process-wide registry, swappable for test isolation
lazy_static! {
    static ref GLOBAL_REGISTRY: RwLock<Arc<BackendRegistry>> =
        RwLock::new(Arc::new(BackendRegistry::new()));
}

/// Shared handle to the process-wide registry.
pub fn global_registry() -> Arc<BackendRegistry> {
    Arc::clone(&*GLOBAL_REGISTRY.read())
}

/// Replace the process-wide registry, returning the previous one.
pub fn set_global_registry(registry: BackendRegistry) -> Arc<BackendRegistry> {
    std::mem::replace(&mut *GLOBAL_REGISTRY.write(), Arc::new(registry))
}

/// Restore a fresh `LogBackend` registry.
pub fn reset_global_registry() -> Arc<BackendRegistry> {
    set_global_registry(BackendRegistry::new())
}

/// Look up `name` in the process-wide registry.
pub fn get_backend(name: &str) -> Arc<dyn Backend> {
    global_registry().get(name)
}
