use crate::errors::AdsError;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

/// Compact one-line JSON for command results.
pub fn to_canonical(value: &Value) -> Result<String, AdsError> {
    serde_json::to_string(value).map_err(|err| AdsError::internal(err.to_string()))
}

/// Recursively orders object keys so the rendering is deterministic.
pub fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            let mut out = serde_json::Map::new();
            for (key, entry) in entries {
                out.insert(key.clone(), sort_keys(entry));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// The call-gql envelope format: keys sorted, 4-space indentation.
pub fn to_pretty_sorted(value: &Value) -> Result<String, AdsError> {
    let sorted = sort_keys(value);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    sorted
        .serialize(&mut serializer)
        .map_err(|err| AdsError::internal(err.to_string()))?;
    String::from_utf8(buf).map_err(|err| AdsError::internal(err.to_string()))
}
