//! Extraction of request fields from an API Gateway style event.

use serde::Serialize;
use serde_json::{json, Value};
use test_common_framework::flatten::flatten_dict;
use test_common_framework::json::{safe_json_dumps_or_empty, safe_json_loads};
use test_common_framework::logging::Logger;
use test_common_framework::nested::get_nested_value;

use crate::error::HandlerError;

pub const ANONYMOUS_USER: &str = "anonymous";
pub const UNKNOWN_ACTION: &str = "unknown";

const CLAIMS_SUB_PATH: &str = "requestContext.authorizer.claims.sub";
const CLAIMS_EMAIL_PATH: &str = "requestContext.authorizer.claims.email";

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedEvent {
    /// `user.id` from the body; keeps its JSON type.
    pub user_id: Value,
    pub action: Value,
    pub raw_body: Value,
}

/// Caller identity from the authorizer claims, independent of the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub user_id: String,
    pub email: String,
}

/// Decode the event body and pull out the fields the handler responds with.
///
/// A missing `body` is an empty object, a string body is decoded with an
/// empty-object fallback, and an object body is used as-is. Any other body,
/// `null` included, or a string that decodes to something other than an
/// object, is rejected.
pub fn process_event_data(
    event: &Value,
    logger: &Logger,
) -> Result<ProcessedEvent, HandlerError> {
    let Some(fields) = event.as_object() else {
        return Err(HandlerError::InvalidEvent(json_kind(event)));
    };

    let body = match fields.get("body") {
        None => json!({}),
        Some(Value::String(text)) => safe_json_loads(text, json!({})),
        Some(body @ Value::Object(_)) => body.clone(),
        Some(other) => return Err(HandlerError::UnsupportedBody(json_kind(other))),
    };
    let Some(body_fields) = body.as_object() else {
        return Err(HandlerError::UnsupportedBody(json_kind(&body)));
    };

    let user_id = get_nested_value(&body, "user.id", json!(ANONYMOUS_USER));
    let action = get_nested_value(&body, "request.action", json!(UNKNOWN_ACTION));

    let flat = flatten_dict(body_fields);
    logger.info(format_args!(
        "Flattened request data: {}",
        safe_json_dumps_or_empty(&flat)
    ));

    Ok(ProcessedEvent {
        user_id,
        action,
        raw_body: body,
    })
}

pub fn extract_user_info(event: &Value) -> UserInfo {
    UserInfo {
        user_id: claim_text(event, CLAIMS_SUB_PATH, ANONYMOUS_USER),
        email: claim_text(event, CLAIMS_EMAIL_PATH, ""),
    }
}

/// Render a field for log lines: strings without quotes, anything else as JSON.
pub fn display_field(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn claim_text(event: &Value, path: &str, default: &str) -> String {
    display_field(&get_nested_value(event, path, json!(default)))
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
