use std::io::Write;

use parking_lot::Mutex;

use super::formatter::Formatter;
use super::level::Level;
use super::record::LogRecord;

/// Output destination for log records.
///
/// Sinks own their formatter and their own level threshold, independent of
/// the logger's level.
pub trait LogSink: Send + Sync {
    fn emit(&self, record: &LogRecord);
}

/// Writes formatted lines to stderr.
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    formatter: Formatter,
    level: Level,
}

impl ConsoleSink {
    pub fn new(formatter: Formatter, level: Level) -> Self {
        Self { formatter, level }
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }
}

impl LogSink for ConsoleSink {
    fn emit(&self, record: &LogRecord) {
        if record.level() < self.level {
            return;
        }
        let line = self.formatter.format(record);
        let mut stderr = std::io::stderr().lock();
        // A failed console write has nowhere better to be reported.
        let _ = writeln!(stderr, "{line}");
    }
}

/// Keeps formatted lines in memory, for tests and diagnostics.
#[derive(Debug, Default)]
pub struct MemorySink {
    formatter: Formatter,
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new(formatter: Formatter) -> Self {
        Self {
            formatter,
            lines: Mutex::new(Vec::new()),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl LogSink for MemorySink {
    fn emit(&self, record: &LogRecord) {
        self.lines.lock().push(self.formatter.format(record));
    }
}
