//! Backend over the `log` facade.
//!
//! The logger name becomes the record target, so per-name filtering and
//! formatting are whatever the installed `log` implementation does with
//! targets (for `env_logger`, the `CONTEXT_LOG` directives).
//!
//! Critical records go out at `Error` with a `severity=CRITICAL` pair;
//! per-record fields from `EmitOptions` ride along as further pairs.

use log::kv;
use log::{Log, Metadata, Record};

use crate::error::Result;
use crate::logging::level::SEVERITY_KEY;
use crate::logging::{Level, ValueDisplay};

use super::{Backend, EmitOptions};

#[derive(Debug, Clone)]
pub struct LogBackend {
    name: String,
}

impl LogBackend {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// Emit into a specific `log` implementation instead of the installed one.
    pub fn emit_to(&self, logger: &dyn Log, level: Level, text: &str, options: &EmitOptions) {
        let log_level = level.to_log_level();
        let target = match options.target {
            Some(target) => target,
            None => self.name.as_str(),
        };
        let metadata = Metadata::builder().level(log_level).target(target).build();
        if !logger.enabled(&metadata) {
            return;
        }

        let displays: Vec<(&str, ValueDisplay<'_>)> = options
            .fields
            .iter()
            .map(|(key, value)| (key.as_str(), ValueDisplay(value)))
            .collect();
        let mut pairs: Vec<(&str, kv::Value<'_>)> = displays
            .iter()
            .map(|(key, value)| (*key, kv::Value::from_display(value)))
            .collect();
        if level == Level::Critical {
            pairs.push((SEVERITY_KEY, kv::Value::from(Level::Critical.as_str())));
        }
        let pairs: &[(&str, kv::Value<'_>)] = &pairs;

        logger.log(
            &Record::builder()
                .metadata(metadata)
                .args(format_args!("{}", text))
                .module_path_static(options.module_path)
                .file_static(options.file)
                .line(options.line)
                .key_values(&pairs)
                .build(),
        );
    }
}

impl Backend for LogBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn emit(&self, level: Level, text: &str, options: &EmitOptions) -> Result<()> {
        if level.to_log_level() > log::max_level() {
            return Ok(());
        }
        self.emit_to(log::logger(), level, text, options);
        Ok(())
    }
}
