//! Lenient field decoders shared across request bodies.

use serde::de::{Deserializer, Error};
use serde::Deserialize;
use serde_json::Value;

/// Accept a string, number or boolean and keep its text form.
///
/// Used for fields that are untyped at the API boundary (task status and
/// priority). `null` and a missing field both decode to `None`.
pub fn free_form<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string, number or boolean, found {}",
            other
        ))),
    }
}

/// Accept `true`/`false`, `0`/`1` or their string forms.
///
/// `null` and a missing field decode to `false`.
pub fn boolean_like<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let invalid = |v: &dyn std::fmt::Display| {
        D::Error::custom(format!("expected a boolean or 0/1, found {}", v))
    };

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(b),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(invalid(&n)),
        },
        Some(Value::String(s)) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(invalid(&s)),
        },
        Some(other) => Err(invalid(&other)),
    }
}
