//! Lenient decoding of the case backend's JSON payloads.
//!
//! The backend is loose about shapes: numbers arrive as strings, ids as
//! numbers, and collections are sometimes wrapped in an envelope object.
//! Everything here degrades to an empty/absent value instead of failing.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::analytics::ChartDatum;
use crate::case::CaseRecord;
use crate::user::{LoginResponse, UserRecord};

/// Alternate spellings the backend uses for case keys, as (canonical, alternate).
const CASE_KEYS: &[(&str, &str)] = &[("id", "_id"), ("district", "District")];
const USER_KEYS: &[(&str, &str)] = &[("id", "_id")];

/// Accept a string or a number for an identifier.
pub fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

/// Accept an integer, a float with no fraction, or a numeric string. Anything
/// else decodes as `None`.
pub fn lenient_opt_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_i64).and_then(|n| i32::try_from(n).ok()))
}

pub fn lenient_opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_i64).and_then(|n| u32::try_from(n).ok()))
}

/// Empty strings on the wire mean "not set".
pub fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_as_u64(value: &Value) -> Option<u64> {
    value_as_i64(value).and_then(|n| u64::try_from(n).ok())
}

/// The array itself, or the first array found under one of `keys`.
fn unwrap_list<'a>(value: &'a Value, keys: &[&str]) -> &'a [Value] {
    if let Value::Array(items) = value {
        return items;
    }
    keys.iter()
        .find_map(|key| value.get(*key).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Collapse alternate key spellings onto the canonical key so serde never
/// sees both. The canonical key wins unless it is blank.
fn fold_keys(item: &Value, keys: &[(&str, &str)]) -> Value {
    let Value::Object(map) = item else {
        return item.clone();
    };
    let mut map = map.clone();
    for (canonical, alternate) in keys {
        if let Some(alt) = map.remove(*alternate) {
            if map.get(*canonical).map_or(true, is_blank) {
                map.insert((*canonical).to_string(), alt);
            }
        }
    }
    Value::Object(map)
}

/// One case record from backend JSON.
pub fn decode_case(item: &Value) -> Option<CaseRecord> {
    serde_json::from_value(fold_keys(item, CASE_KEYS)).ok()
}

/// One user record from backend JSON.
pub fn decode_user(item: &Value) -> Option<UserRecord> {
    serde_json::from_value(fold_keys(item, USER_KEYS)).ok()
}

/// Login body. The embedded user goes through the same key folding.
pub fn decode_login_response(value: &Value) -> Result<LoginResponse, serde_json::Error> {
    let mut value = value.clone();
    if let Some(user) = value.get_mut("user") {
        *user = fold_keys(user, USER_KEYS);
    }
    serde_json::from_value(value)
}

/// Case list: a bare array or `{ "data": [...] }`. Items that do not decode
/// as a case record are skipped.
pub fn coerce_case_list(value: &Value) -> Vec<CaseRecord> {
    unwrap_list(value, &["data"])
        .iter()
        .filter_map(decode_case)
        .collect()
}

/// User list: a bare array or an envelope keyed by `users`, `data` or `results`.
pub fn coerce_user_list(value: &Value) -> Vec<UserRecord> {
    unwrap_list(value, &["users", "data", "results"])
        .iter()
        .filter_map(decode_user)
        .collect()
}

/// Crime-type counts as chart data.
///
/// Accepts `[{crime_type|Crime_type|name, count|value|cases}]` or an object
/// mapping crime type to count.
pub fn coerce_crime_type_counts(value: &Value) -> Vec<ChartDatum> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| {
                let name = ["crime_type", "Crime_type", "name"]
                    .iter()
                    .find_map(|k| item.get(*k).and_then(Value::as_str))
                    .filter(|s| !s.is_empty())
                    .unwrap_or("Unknown")
                    .to_string();
                let value = ["count", "value", "cases"]
                    .iter()
                    .find_map(|k| item.get(*k).and_then(value_as_u64))
                    .unwrap_or(0);
                ChartDatum { name, value }
            })
            .collect(),
        Value::Object(map) => map
            .iter()
            .map(|(name, count)| ChartDatum {
                name: name.clone(),
                value: value_as_u64(count).unwrap_or(0),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Total case count: `{ "total": n }` or a bare number.
pub fn coerce_case_count(value: &Value) -> Option<u64> {
    match value {
        Value::Object(_) => value.get("total").and_then(value_as_u64),
        other => value_as_u64(other),
    }
}

/// The case the backend echoed after a create or update, if the body is one.
///
/// Some deployments wrap it under `data`; others answer with a bare
/// `{ "message": ... }`, in which case `None` is returned.
pub fn coerce_echoed_case(value: &Value) -> Option<CaseRecord> {
    let candidate = match value.get("data") {
        Some(inner @ Value::Object(_)) => inner,
        _ => value,
    };
    let has_id = candidate.get("id").or_else(|| candidate.get("_id")).is_some();
    if !has_id {
        return None;
    }
    decode_case(candidate)
}

/// The `message` field of an error body, if any.
pub fn error_message(value: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .find_map(|k| value.get(*k).and_then(Value::as_str))
        .map(str::to_string)
}
