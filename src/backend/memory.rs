//! In-memory capture backend for tests and harnesses.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::logging::Level;

use super::{Backend, EmitOptions};

/// One captured emission.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryRecord {
    pub level: Level,
    pub text: String,
    pub options: EmitOptions,
}

#[derive(Debug, Default)]
struct MemoryState {
    records: Vec<MemoryRecord>,
    failure: Option<String>,
}

/// Records every emission. Clones share the same buffer.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    name: String,
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBackend {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Arc::new(Mutex::new(MemoryState::default())),
        }
    }

    pub fn records(&self) -> Vec<MemoryRecord> {
        self.state.lock().records.clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.state.lock().records.iter().map(|r| r.text.clone()).collect()
    }

    pub fn count_at(&self, level: Level) -> usize {
        self.state
            .lock()
            .records
            .iter()
            .filter(|r| r.level == level)
            .count()
    }

    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().records.is_empty()
    }

    pub fn clear(&self) {
        self.state.lock().records.clear();
    }

    /// Make every subsequent emission fail with `message`.
    pub fn fail_with(&self, message: &str) {
        self.state.lock().failure = Some(message.to_string());
    }

    pub fn recover(&self) {
        self.state.lock().failure = None;
    }
}

impl Backend for MemoryBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn emit(&self, level: Level, text: &str, options: &EmitOptions) -> Result<()> {
        let mut state = self.state.lock();
        if let Some(message) = &state.failure {
            return Err(Error::backend(&self.name, message.clone()));
        }
        state.records.push(MemoryRecord {
            level,
            text: text.to_string(),
            options: options.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_are_shared_between_clones() {
        let backend = MemoryBackend::new("svc");
        let other = backend.clone();

        backend.emit(Level::Info, "a", &EmitOptions::new()).unwrap();
        other.emit(Level::Warning, "b", &EmitOptions::new()).unwrap();

        assert_eq!(backend.len(), 2);
        assert_eq!(other.texts(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(backend.count_at(Level::Warning), 1);

        other.clear();
        assert!(backend.is_empty());
    }

    #[test]
    fn test_failure_mode() {
        let backend = MemoryBackend::new("svc");
        backend.fail_with("disk full");

        let err = backend
            .emit(Level::Error, "x", &EmitOptions::new())
            .unwrap_err();
        assert!(matches!(err, Error::Backend { ref backend, .. } if backend == "svc"));
        assert!(backend.is_empty());

        backend.recover();
        assert!(backend.emit(Level::Error, "x", &EmitOptions::new()).is_ok());
        assert_eq!(backend.len(), 1);
    }
}
