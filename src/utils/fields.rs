use crate::errors::AdsError;
use serde_json::{Map, Value};

/// Reduces `data` to the values named by `fields`.
///
/// `fields` is a comma separated list of paths, each path a period separated
/// chain of keys and list indices, e.g. `thingies.0.id,thingies.1.id` against
/// `{"thingies": [{"id": 1, "name": "t1"}, {"id": 2, "name": "t2"}]}` yields
/// `{"thingies.0.id": 1, "thingies.1.id": 2}`. A single surviving entry
/// collapses to its bare value, and when that value is a one-element list it
/// collapses once more to the lone element. An empty spec returns `data`
/// untouched.
pub fn project(data: &Value, fields: &str) -> Result<Value, AdsError> {
    if fields.trim().is_empty() {
        return Ok(data.clone());
    }
    let mut out = Map::new();
    for path in fields.split(',') {
        let mut current = data;
        for token in path.split('.') {
            current = index_step(current, token, path)?;
        }
        out.insert(path.to_string(), current.clone());
    }
    if out.len() == 1 {
        let value = out
            .into_iter()
            .next()
            .map(|(_, value)| value)
            .unwrap_or(Value::Null);
        if let Value::Array(items) = &value {
            if items.len() == 1 {
                return Ok(items[0].clone());
            }
        }
        return Ok(value);
    }
    Ok(Value::Object(out))
}

/// One step of the walk: lists are indexed by position, everything else by
/// key. `path` only labels the error message.
pub fn index_step<'a>(current: &'a Value, token: &str, path: &str) -> Result<&'a Value, AdsError> {
    if let Value::Array(items) = current {
        let index: usize = token.parse().map_err(|_| {
            AdsError::invalid_params(format!(
                "Field path '{}' indexes a list with non-numeric token '{}'",
                path, token
            ))
        })?;
        return items.get(index).ok_or_else(|| {
            AdsError::not_found(format!(
                "Field path '{}' index {} is out of range",
                path, index
            ))
        });
    }
    current
        .get(token)
        .ok_or_else(|| AdsError::not_found(format!("Field path '{}' has no key '{}'", path, token)))
}

/// Drills through a response envelope along `keys`, e.g. `["data"]` out of
/// `{"data": [...]}`.
pub fn drill<S: AsRef<str>>(data: &Value, keys: &[S]) -> Result<Value, AdsError> {
    let mut current = data;
    for key in keys {
        let key = key.as_ref();
        current = current.get(key).ok_or_else(|| {
            AdsError::not_found(format!("Response envelope has no '{}' entry", key))
        })?;
    }
    Ok(current.clone())
}

/// Splits a comma separated field spec into its non-empty entries.
pub fn split_spec(fields: &str) -> Vec<String> {
    fields
        .split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect()
}
