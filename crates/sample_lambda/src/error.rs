use crate::adapters::http::ApiError;

/// Failures raised while handling a single event. The handler converts every
/// variant into a status-500 response.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("event must be a JSON object, got {0}")]
    InvalidEvent(&'static str),

    #[error("request body must be a JSON object or JSON-encoded string, got {0}")]
    UnsupportedBody(&'static str),

    #[error("EXTERNAL_API_URL is configured but no HTTP client is available")]
    ExternalApiUnavailable,

    #[error(transparent)]
    ExternalApi(#[from] ApiError),
}
