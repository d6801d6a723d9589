use chrono::{DateTime, Utc};

use super::level::Level;

#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    logger: String,
    level: Level,
    message: String,
    timestamp: DateTime<Utc>,
}

impl LogRecord {
    pub fn new(logger: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self::with_timestamp(logger, level, message, Utc::now())
    }

    pub fn with_timestamp(
        logger: impl Into<String>,
        level: Level,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            logger: logger.into(),
            level,
            message: message.into(),
            timestamp,
        }
    }

    pub fn logger(&self) -> &str {
        &self.logger
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
