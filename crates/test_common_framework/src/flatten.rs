use serde_json::{Map, Value};

use crate::nested::DEFAULT_SEPARATOR;

pub fn flatten_dict(map: &Map<String, Value>) -> Map<String, Value> {
    flatten_dict_with(map, "", DEFAULT_SEPARATOR)
}

/// Collapse nested objects into one level keyed by `separator`-joined paths.
///
/// Only objects are descended into; arrays and scalars are leaves. An empty
/// nested object contributes no entries. When two paths produce the same
/// composite key the later one wins.
pub fn flatten_dict_with(
    map: &Map<String, Value>,
    prefix: &str,
    separator: &str,
) -> Map<String, Value> {
    let mut flat = Map::new();
    flatten_into(&mut flat, map, prefix, separator);
    flat
}

/// Flatten a value that is expected to be an object.
pub fn flatten_value(value: &Value) -> Option<Map<String, Value>> {
    value.as_object().map(flatten_dict)
}

fn flatten_into(
    out: &mut Map<String, Value>,
    map: &Map<String, Value>,
    prefix: &str,
    separator: &str,
) {
    for (key, value) in map {
        let composite = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}{separator}{key}")
        };
        match value {
            Value::Object(child) => flatten_into(out, child, &composite, separator),
            leaf => {
                out.insert(composite, leaf.clone());
            }
        }
    }
}
