//! Named loggers with console output and idempotent setup.
//!
//! A [`LoggerRegistry`] maps names to shared [`Logger`] handles. It is an
//! ordinary value: the composition root creates one and hands the resulting
//! loggers to whatever needs them. [`LoggerRegistry::setup_logger`] attaches a
//! console sink only the first time a name is configured, so repeated setup
//! never duplicates output lines.

mod formatter;
mod level;
mod record;
mod sink;

use std::collections::{hash_map::Entry, HashMap};
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::FrameworkError;

pub use formatter::{Formatter, DEFAULT_FORMAT};
pub use level::{Level, ParseLevelError};
pub use record::LogRecord;
pub use sink::{ConsoleSink, LogSink, MemorySink};

pub struct Logger {
    name: String,
    level: RwLock<Level>,
    sinks: RwLock<Vec<Arc<dyn LogSink>>>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("sinks", &self.sink_count())
            .finish()
    }
}

impl Logger {
    pub fn new(name: impl Into<String>, level: Level) -> Self {
        Self {
            name: name.into(),
            level: RwLock::new(level),
            sinks: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        *self.level.read()
    }

    pub fn set_level(&self, level: Level) {
        *self.level.write() = level;
    }

    pub fn is_enabled_for(&self, level: Level) -> bool {
        level >= self.level()
    }

    pub fn add_sink(&self, sink: Arc<dyn LogSink>) {
        self.sinks.write().push(sink);
    }

    /// Attach the sink built by `make` unless one is already attached.
    ///
    /// The check and the push happen under a single write lock. Returns
    /// whether a sink was attached.
    pub fn attach_if_empty<F>(&self, make: F) -> bool
    where
        F: FnOnce() -> Arc<dyn LogSink>,
    {
        let mut sinks = self.sinks.write();
        if !sinks.is_empty() {
            return false;
        }
        sinks.push(make());
        true
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.read().len()
    }

    pub fn log(&self, level: Level, message: impl fmt::Display) {
        if !self.is_enabled_for(level) {
            return;
        }
        let record = LogRecord::new(self.name.as_str(), level, message.to_string());
        for sink in self.sinks.read().iter() {
            sink.emit(&record);
        }
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::Info, message);
    }

    pub fn warning(&self, message: impl fmt::Display) {
        self.log(Level::Warning, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::Error, message);
    }

    pub fn critical(&self, message: impl fmt::Display) {
        self.log(Level::Critical, message);
    }
}

#[derive(Debug, Default)]
pub struct LoggerRegistry {
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve the logger registered under `name`, creating it (with no
    /// sinks and the default level) if needed.
    ///
    /// There is no root logger: an empty or whitespace-only name is rejected
    /// with [`FrameworkError::InvalidLoggerName`] rather than resolving to a
    /// shared parent.
    pub fn get_logger(&self, name: &str) -> Result<Arc<Logger>, FrameworkError> {
        if name.trim().is_empty() {
            return Err(FrameworkError::InvalidLoggerName);
        }

        if let Some(logger) = self.loggers.read().get(name) {
            return Ok(Arc::clone(logger));
        }

        let mut loggers = self.loggers.write();
        let logger = match loggers.entry(name.to_string()) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                Arc::clone(entry.insert(Arc::new(Logger::new(name, Level::default()))))
            }
        };
        Ok(logger)
    }

    /// Configure `name` with a console sink using `format` (or
    /// [`DEFAULT_FORMAT`]).
    ///
    /// The level is updated on every call; the sink, and therefore the
    /// format, is only set on the first call for a given name.
    pub fn setup_logger(
        &self,
        name: &str,
        level: Level,
        format: Option<&str>,
    ) -> Result<Arc<Logger>, FrameworkError> {
        let logger = self.get_logger(name)?;
        logger.set_level(level);
        logger.attach_if_empty(|| {
            let formatter = Formatter::new(format.unwrap_or(DEFAULT_FORMAT));
            Arc::new(ConsoleSink::new(formatter, level))
        });
        Ok(logger)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loggers.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_is_idempotent_per_name() {
        let registry = LoggerRegistry::new();
        let first = registry
            .setup_logger("my_lambda", Level::Info, None)
            .expect("setup should pass");
        let second = registry
            .setup_logger("my_lambda", Level::Debug, Some("{message}"))
            .expect("setup should pass");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.sink_count(), 1);
        assert_eq!(second.level(), Level::Debug);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_names_get_distinct_loggers() {
        let registry = LoggerRegistry::new();
        let a = registry.setup_logger("a", Level::Info, None).expect("setup");
        let b = registry.setup_logger("b", Level::Info, None).expect("setup");
        assert!(!Arc::ptr_eq(&a, &b));
        assert!(registry.contains("a") && registry.contains("b"));
    }

    #[test]
    fn setup_keeps_a_sink_added_before_setup() {
        let registry = LoggerRegistry::new();
        let memory = Arc::new(MemorySink::new(Formatter::new("{message}")));
        registry
            .get_logger("svc")
            .expect("lookup")
            .add_sink(memory.clone());

        let logger = registry.setup_logger("svc", Level::Info, None).expect("setup");
        logger.info("hello");

        assert_eq!(logger.sink_count(), 1);
        assert_eq!(memory.lines(), vec!["hello".to_string()]);
    }

    #[test]
    fn records_below_logger_level_are_dropped() {
        let logger = Logger::new("svc", Level::Warning);
        let memory = Arc::new(MemorySink::new(Formatter::new("{levelname}:{message}")));
        logger.add_sink(memory.clone());

        logger.info("ignored");
        logger.warning("kept");
        logger.critical(format_args!("{} failures", 3));

        assert_eq!(
            memory.lines(),
            vec!["WARNING:kept".to_string(), "CRITICAL:3 failures".to_string()]
        );
    }

    #[test]
    fn rejects_empty_name() {
        let registry = LoggerRegistry::new();
        assert_eq!(
            registry.get_logger("  ").expect_err("empty name should fail"),
            FrameworkError::InvalidLoggerName
        );
        assert!(registry.is_empty());
    }
}
