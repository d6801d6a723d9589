//! JSON encode/decode helpers that never fail.
//!
//! Malformed input maps to a caller-supplied default instead of an error, so
//! callers can treat untrusted payloads as plain data.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::Value;

pub const DEFAULT_JSON_TEXT: &str = "{}";

/// Parse `text` into `T`, returning `default` on malformed syntax or a shape
/// that does not deserialize into `T`.
pub fn safe_json_loads<T: DeserializeOwned>(text: &str, default: T) -> T {
    serde_json::from_str(text).unwrap_or(default)
}

/// Parse a dynamically typed input. Only `Value::String` is parsed; any other
/// input is not text and yields `default`.
pub fn safe_json_loads_value(input: &Value, default: Value) -> Value {
    match input {
        Value::String(text) => safe_json_loads(text, default),
        _ => default,
    }
}

/// Serialize `value`, returning `default` when serialization fails.
pub fn safe_json_dumps<T: Serialize + ?Sized>(value: &T, default: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| default.to_string())
}

pub fn safe_json_dumps_or_empty<T: Serialize + ?Sized>(value: &T) -> String {
    safe_json_dumps(value, DEFAULT_JSON_TEXT)
}

/// Serializes the wrapped value as its `Display` string.
///
/// Use it for values with no native JSON representation so they degrade to
/// their string form instead of failing the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsDisplay<T>(pub T);

impl<T: fmt::Display> Serialize for AsDisplay<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}
