//! Delimited-path lookup into nested JSON mappings.

use serde_json::Value;

pub const DEFAULT_SEPARATOR: &str = ".";

/// Walk `root` along `path` split on `separator`.
///
/// Returns `None` as soon as a segment is missing or an intermediate value is
/// not an object. An empty `path` is the single key `""`, which only matches
/// an object that literally has an empty-string key. An empty `separator`
/// treats the whole path as one key.
pub fn lookup<'a>(root: &'a Value, path: &str, separator: &str) -> Option<&'a Value> {
    let mut current = root;
    for key in split_path(path, separator) {
        current = current.as_object()?.get(key)?;
    }
    Some(current)
}

pub fn get_nested_value(root: &Value, path: &str, default: Value) -> Value {
    get_nested_value_with(root, path, default, DEFAULT_SEPARATOR)
}

pub fn get_nested_value_with(root: &Value, path: &str, default: Value, separator: &str) -> Value {
    lookup(root, path, separator).cloned().unwrap_or(default)
}

fn split_path<'p>(path: &'p str, separator: &'p str) -> Box<dyn Iterator<Item = &'p str> + 'p> {
    if separator.is_empty() {
        Box::new(std::iter::once(path))
    } else {
        Box::new(path.split(separator))
    }
}
