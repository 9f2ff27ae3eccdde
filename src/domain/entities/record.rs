//! Field access on the JSON object backing a content record.

use serde_json::{Map, Value};

/// Returns the value of `key` when it is a string.
pub(super) fn str_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

/// Sets `key` to a string. An existing key keeps its position in the object.
pub(super) fn set_str_field(fields: &mut Map<String, Value>, key: &str, value: String) {
    fields.insert(key.to_owned(), Value::String(value));
}
