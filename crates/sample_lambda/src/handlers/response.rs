use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use test_common_framework::json::safe_json_dumps_or_empty;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

/// Body model of a successful invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LambdaResponse<T> {
    pub status_code: u16,
    pub message: String,
    pub data: T,
}

pub fn format_response(status_code: u16, body: &impl Serialize) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json!({"Content-Type": "application/json"}),
        body: safe_json_dumps_or_empty(body),
    }
}

pub fn internal_error_response(error: &impl std::fmt::Display) -> ApiGatewayResponse {
    format_response(
        500,
        &json!({
            "error": error.to_string(),
            "message": "Internal server error",
        }),
    )
}
