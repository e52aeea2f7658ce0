//! Bridge between the JSON values scripts exchange with the host and [`Value`].
//!
//! JSON has a single number type, so integral numbers become `UInt`/`Int` and
//! everything else becomes `Double`. Object keys name struct tags; keys without
//! a leading decimal integer are skipped.

use super::Value;
use serde_json::{Map, Number, Value as Json};
use std::collections::BTreeMap;

/// 2^64 as an f64, the first integral double outside `u64`.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;
/// -2^63, the smallest integral double inside `i64`.
const I64_FLOOR: f64 = -9_223_372_036_854_775_808.0;

impl From<&Json> for Value {
    fn from(json: &Json) -> Self {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => number_to_value(n),
            Json::String(s) => Value::Utf8(s.clone()),
            Json::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            Json::Object(fields) => Value::Struct(object_to_fields(fields)),
        }
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        Value::from(&json)
    }
}

impl Value {
    /// JSON view of a decoded value: struct tags become string keys, byte
    /// strings become arrays of numbers and non-finite floats become `null`.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(i) => Json::from(*i),
            Value::UInt(u) => Json::from(*u),
            Value::Float(f) => float_to_json(f64::from(*f)),
            Value::Double(d) => float_to_json(*d),
            Value::Utf8(s) => Json::String(s.clone()),
            Value::Bytes(bytes) => Json::Array(bytes.iter().map(|b| Json::from(*b)).collect()),
            Value::Struct(fields) => Json::Object(
                fields
                    .iter()
                    .map(|(tag, v)| (tag.to_string(), v.to_json()))
                    .collect(),
            ),
            Value::Array(items) | Value::List(items) => {
                Json::Array(items.iter().map(Value::to_json).collect())
            }
        }
    }
}

fn float_to_json(f: f64) -> Json {
    Number::from_f64(f).map_or(Json::Null, Json::Number)
}

fn number_to_value(n: &Number) -> Value {
    if let Some(u) = n.as_u64() {
        return Value::UInt(u);
    }
    if let Some(i) = n.as_i64() {
        return Value::Int(i);
    }
    let f = n.as_f64().unwrap_or(f64::NAN);
    if f.is_finite() && f.fract() == 0.0 {
        if (0.0..U64_LIMIT).contains(&f) {
            return Value::UInt(f as u64);
        }
        if (I64_FLOOR..0.0).contains(&f) {
            return Value::Int(f as i64);
        }
    }
    Value::Double(f)
}

fn object_to_fields(fields: &Map<String, Json>) -> BTreeMap<u32, Value> {
    let mut out = BTreeMap::new();
    for (key, v) in fields {
        match parse_tag_key(key) {
            Some(tag) => {
                out.insert(tag, Value::from(v));
            }
            None => log::debug!("skipping non-numeric struct key {key:?}"),
        }
    }
    out
}

/// Leading decimal integer of `key`, after optional whitespace and `+`.
pub(crate) fn parse_tag_key(key: &str) -> Option<u32> {
    let trimmed = key.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::parse_tag_key;
    use crate::Value;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn numbers_map_to_integer_families() {
        assert_eq!(Value::from(&json!(5)), Value::UInt(5));
        assert_eq!(Value::from(&json!(-5)), Value::Int(-5));
        assert_eq!(Value::from(&json!(2.0)), Value::UInt(2));
        assert_eq!(Value::from(&json!(-3.0)), Value::Int(-3));
        assert_eq!(Value::from(&json!(2.5)), Value::Double(2.5));
        assert_eq!(Value::from(&json!(1e300)), Value::Double(1e300));
    }

    #[test]
    fn object_keys_become_tags() {
        let v = Value::from(&json!({"0": true, "2": "x", "name": 1, "10": null}));
        let expected = BTreeMap::from([
            (0, Value::Bool(true)),
            (2, Value::Utf8("x".into())),
            (10, Value::Null),
        ]);
        assert_eq!(v, Value::Struct(expected));
    }

    #[test]
    fn tag_keys_parse_leading_digits() {
        assert_eq!(parse_tag_key("3"), Some(3));
        assert_eq!(parse_tag_key(" +4"), Some(4));
        assert_eq!(parse_tag_key("5abc"), Some(5));
        assert_eq!(parse_tag_key("-1"), None);
        assert_eq!(parse_tag_key("abc"), None);
        assert_eq!(parse_tag_key(""), None);
    }

    #[test]
    fn to_json_stringifies_tags() {
        let v = Value::Struct(BTreeMap::from([
            (1, Value::Bytes(vec![1, 2])),
            (2, Value::List(vec![Value::Int(-1), Value::Float(0.5)])),
            (3, Value::Double(f64::NAN)),
        ]));
        assert_eq!(
            v.to_json(),
            json!({"1": [1, 2], "2": [-1, 0.5], "3": null})
        );
    }
}
