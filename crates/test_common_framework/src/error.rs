/// Errors raised by the framework helpers for invalid arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameworkError {
    #[error("chunk size must be a positive integer")]
    InvalidChunkSize,

    #[error("invalid retry policy: {0}")]
    InvalidRetryPolicy(String),

    #[error("logger name cannot be empty")]
    InvalidLoggerName,
}
