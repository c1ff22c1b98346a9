//! The value tree shared by the codec and the JSON boundary

use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

/// Ordered key/value storage for objects (insertion order is kept)
pub type Map = IndexMap<String, Value>;

/// A JSON document as a closed tagged union.
///
/// Numbers are split three ways: `Integer` for anything that fits `i64`,
/// `UnsignedInteger` for values above `i64::MAX`, and `Float` for everything
/// with a fraction or exponent. Floats are narrowed to 32 bits; the binary
/// format only carries `f32`.
///
/// Equality is order-sensitive for objects: `{"a":1,"b":2}` and
/// `{"b":2,"a":1}` are different values, since they encode differently.
#[derive(Debug, Clone, Default)]
pub enum Value {
    Object(Map),
    Array(Vec<Value>),
    String(String),
    Integer(i64),
    UnsignedInteger(u64),
    Float(f32),
    Bool(bool),
    #[default]
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Integer(i) => Some(i),
            Value::UnsignedInteger(u) => i64::try_from(u).ok(),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Object member lookup; `None` for missing keys and non-objects
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            // IndexMap's own equality ignores order
            (Value::Object(a), Value::Object(b)) => a.len() == b.len() && a.iter().eq(b.iter()),
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::UnsignedInteger(a), Value::UnsignedInteger(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            _ => false,
        }
    }
}

/// Widens an `f32` through its shortest decimal form, so `0.123f32`
/// becomes `0.123f64` rather than `0.12300000339746475`.
fn widen_f32(f: f32) -> Option<f64> {
    if !f.is_finite() {
        return None;
    }
    f.to_string().parse::<f64>().ok()
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UnsignedInteger(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or_default() as f32)
                }
            }
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Null => Value::Null,
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::String(s) => serde_json::Value::String(s),
            Value::Integer(i) => serde_json::Value::from(i),
            Value::UnsignedInteger(u) => serde_json::Value::from(u),
            // Non-finite floats have no JSON form
            Value::Float(f) => widen_f32(f)
                .and_then(serde_json::Number::from_f64)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Null => serde_json::Value::Null,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Object(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            }
            Value::Array(items) => {
                let mut state = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    state.serialize_element(item)?;
                }
                state.end()
            }
            Value::String(s) => serializer.serialize_str(s),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::UnsignedInteger(u) => serializer.serialize_u64(*u),
            Value::Float(f) => serializer.serialize_f32(*f),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Null => serializer.serialize_unit(),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, i: i64) -> Result<Value, E> {
        Ok(Value::Integer(i))
    }

    fn visit_u64<E: de::Error>(self, u: u64) -> Result<Value, E> {
        Ok(match i64::try_from(u) {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::UnsignedInteger(u),
        })
    }

    fn visit_f64<E: de::Error>(self, f: f64) -> Result<Value, E> {
        Ok(Value::Float(f as f32))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
        Ok(Value::String(s.to_owned()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
        Ok(Value::String(s))
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Deserialize::deserialize(deserializer)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut map = Map::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.insert(key, value);
        }
        Ok(Value::Object(map))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_number_split() {
        let value: Value = serde_json::from_str("[1, -1, 18446744073709551615, 0.5]").unwrap();
        assert_eq!(
            value,
            Value::Array(vec![
                Value::Integer(1),
                Value::Integer(-1),
                Value::UnsignedInteger(u64::MAX),
                Value::Float(0.5),
            ])
        );
    }

    #[test]
    fn test_parse_keeps_key_order() {
        let value: Value = serde_json::from_str(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_equality_sees_key_order() {
        let ab: Value = serde_json::from_str(r#"{"a": 1, "b": 2}"#).unwrap();
        let ba: Value = serde_json::from_str(r#"{"b": 2, "a": 1}"#).unwrap();
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());

        let nested_ab = Value::Array(vec![ab]);
        let nested_ba = Value::Array(vec![ba]);
        assert_ne!(nested_ab, nested_ba);
    }

    #[test]
    fn test_accessors() {
        let value: Value =
            serde_json::from_str(r#"{"f": 1.5, "b": true, "list": [1, 2], "n": null}"#).unwrap();
        assert_eq!(value.get("f").and_then(Value::as_f32), Some(1.5));
        assert_eq!(value.get("b").and_then(Value::as_bool), Some(true));
        assert_eq!(
            value.get("list").and_then(Value::as_array),
            Some(&[Value::Integer(1), Value::Integer(2)][..])
        );
        assert!(value.get("n").is_some_and(Value::is_null));

        assert_eq!(value.get("f").and_then(Value::as_bool), None);
        assert_eq!(value.get("b").and_then(Value::as_f32), None);
        assert_eq!(value.get("missing"), None);
        assert_eq!(Value::UnsignedInteger(u64::MAX).as_i64(), None);
        assert_eq!(Value::Null.get("f"), None);
    }

    #[test]
    fn test_float_prints_shortest_form() {
        let value = Value::Float(0.123);
        assert_eq!(serde_json::to_string(&value).unwrap(), "0.123");
        assert_eq!(serde_json::Value::from(value), json!(0.123));
    }

    #[test]
    fn test_non_finite_float_becomes_null() {
        assert_eq!(serde_json::Value::from(Value::Float(f32::NAN)), json!(null));
        assert_eq!(serde_json::to_string(&Value::Float(f32::INFINITY)).unwrap(), "null");
    }

    #[test]
    fn test_from_serde_json_value() {
        let data = json!({"name": "Alice", "tags": ["a", true, null], "n": 42});
        let value = Value::from(data.clone());
        assert_eq!(value.get("name").and_then(Value::as_str), Some("Alice"));
        assert_eq!(value.get("n").and_then(Value::as_i64), Some(42));
        assert_eq!(serde_json::Value::from(value), data);
    }

    #[test]
    fn test_serialize_matches_conversion() {
        let text = r#"{"b":[1,2.5,"x"],"a":{"c":null,"d":false}}"#;
        let value: Value = serde_json::from_str(text).unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), text);
    }
}
