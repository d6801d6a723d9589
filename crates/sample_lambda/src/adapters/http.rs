//! Outbound HTTP calls made by the handler.
//!
//! [`ExternalApi`] is the seam the handler depends on; [`ReqwestExternalApi`]
//! is the blocking `reqwest` implementation used by the Lambda binary.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use test_common_framework::retry::{RetryPolicy, Sleeper};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("response from {url} is not valid JSON: {message}")]
    Decode { url: String, message: String },
}

impl ApiError {
    /// Client errors other than timeouts and throttling will fail the same
    /// way on every attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Status { status, .. } => {
                !(400..500).contains(status) || matches!(*status, 408 | 429)
            }
            Self::Client(_) | Self::Decode { .. } => false,
            Self::Transport { .. } => true,
        }
    }
}

pub trait ExternalApi {
    /// GET `url` and decode the response body as JSON.
    fn fetch_json(&self, url: &str) -> Result<Value, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestExternalApi {
    client: Client,
}

impl ReqwestExternalApi {
    pub fn new() -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|error| ApiError::Client(error.to_string()))?;
        Ok(Self { client })
    }
}

impl ExternalApi for ReqwestExternalApi {
    fn fetch_json(&self, url: &str) -> Result<Value, ApiError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|error| ApiError::Transport {
                url: url.to_string(),
                message: error.to_string(),
            })?;

        let response = response.error_for_status().map_err(|error| match error.status() {
            Some(status) => ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            },
            None => ApiError::Transport {
                url: url.to_string(),
                message: error.to_string(),
            },
        })?;

        response.json::<Value>().map_err(|error| ApiError::Decode {
            url: url.to_string(),
            message: error.to_string(),
        })
    }
}

/// Fetch `url` through `api`, retrying transient failures per `policy`.
pub fn call_external_api(
    api: &dyn ExternalApi,
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    url: &str,
) -> Result<Value, ApiError> {
    policy.retry_with(sleeper, ApiError::is_retryable, || api.fetch_json(url))
}
