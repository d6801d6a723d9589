use std::env;

use test_common_framework::logging::Level;
use test_common_framework::retry::{
    RetryPolicy, DEFAULT_BACKOFF, DEFAULT_DELAY, DEFAULT_MAX_ATTEMPTS,
};
use test_common_framework::FrameworkError;

pub const DEFAULT_LOGGER_NAME: &str = "my_lambda";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid retry configuration: {0}")]
    Retry(#[from] FrameworkError),
}

/// Handler configuration, read from the Lambda environment.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerConfig {
    pub logger_name: String,
    pub log_level: Level,
    /// Custom log line template; `None` uses the framework default.
    pub log_format: Option<String>,
    /// When set, every invocation fetches this URL under `retry`.
    pub external_api_url: Option<String>,
    pub retry: RetryPolicy,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            logger_name: DEFAULT_LOGGER_NAME.to_string(),
            log_level: Level::Info,
            log_format: None,
            external_api_url: None,
            retry: RetryPolicy::default(),
        }
    }
}

impl HandlerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup. Unparseable numbers fall
    /// back to their defaults; values that parse but describe an invalid
    /// retry policy are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let logger_name =
            non_empty("LOGGER_NAME").unwrap_or_else(|| DEFAULT_LOGGER_NAME.to_string());
        let log_level = non_empty("LOG_LEVEL")
            .map(|value| Level::parse_or_info(&value))
            .unwrap_or(Level::Info);
        let log_format = non_empty("LOG_FORMAT");
        let external_api_url = non_empty("EXTERNAL_API_URL").map(|url| url.trim().to_string());

        let max_attempts = non_empty("RETRY_MAX_ATTEMPTS")
            .and_then(|value| value.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_ATTEMPTS);
        let delay_secs = non_empty("RETRY_DELAY_SECS")
            .and_then(|value| value.trim().parse::<f64>().ok())
            .unwrap_or(DEFAULT_DELAY.as_secs_f64());
        let backoff = non_empty("RETRY_BACKOFF")
            .and_then(|value| value.trim().parse::<f64>().ok())
            .unwrap_or(DEFAULT_BACKOFF);

        let config = Self {
            logger_name,
            log_level,
            log_format,
            external_api_url,
            retry: RetryPolicy::from_secs_f64(max_attempts, delay_secs, backoff)?,
        };
        Ok(config)
    }
}
