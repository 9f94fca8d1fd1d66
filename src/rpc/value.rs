//! Dynamic value tree exchanged with the transport
//!
//! Mirrors the XML-RPC data model: scalars, ordered arrays and keyed
//! structs. Accessors never panic on a type mismatch; they return a
//! [`MarshalError`] naming the field that had the wrong shape.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::MarshalError;

/// Keyed member map of a struct value
pub type Struct = BTreeMap<String, Value>;

/// A loosely typed wire value
///
/// Deserializes untagged, so JSON fixtures map naturally: `true` → `Bool`,
/// `3` → `Int`, `3.5` → `Double`, `"x"` → `String`, `[..]` → `Array`,
/// `{..}` → `Struct`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Array(Vec<Value>),
    Struct(Struct),
}

impl Value {
    /// Name of the runtime type, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Struct(_) => "struct",
        }
    }

    /// The service answers `false` in place of an empty result set
    pub fn is_false(&self) -> bool {
        matches!(self, Value::Bool(false))
    }

    pub fn as_str(&self, field: &str) -> Result<&str, MarshalError> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(MarshalError::mismatch(field, "string", other.type_name())),
        }
    }

    /// Doubles, with integers widened
    pub fn as_f64(&self, field: &str) -> Result<f64, MarshalError> {
        match self {
            Value::Double(d) => Ok(*d),
            Value::Int(i) => Ok(*i as f64),
            other => Err(MarshalError::mismatch(field, "double", other.type_name())),
        }
    }

    pub fn as_array(&self, field: &str) -> Result<&[Value], MarshalError> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(MarshalError::mismatch(field, "array", other.type_name())),
        }
    }

    pub fn as_struct(&self, field: &str) -> Result<&Struct, MarshalError> {
        match self {
            Value::Struct(members) => Ok(members),
            other => Err(MarshalError::mismatch(field, "struct", other.type_name())),
        }
    }

    /// Render any scalar as a string. Used where the service mixes
    /// integer and string encodings for the same field.
    pub fn to_scalar_string(&self, field: &str) -> Result<String, MarshalError> {
        match self {
            Value::String(s) => Ok(s.clone()),
            Value::Int(i) => Ok(i.to_string()),
            Value::Double(d) => Ok(d.to_string()),
            Value::Bool(b) => Ok(if *b { "1" } else { "0" }.to_string()),
            other => Err(MarshalError::mismatch(field, "scalar", other.type_name())),
        }
    }

    /// Member lookup; `None` when absent or when `self` is not a struct
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Struct(members) => members.get(key),
            _ => None,
        }
    }

    /// String member, defaulting to empty when the key is absent
    pub fn string_field(&self, key: &str) -> Result<String, MarshalError> {
        match self.get(key) {
            Some(value) => value.as_str(key).map(str::to_string),
            None => Ok(String::new()),
        }
    }

    /// Scalar member rendered as a string, empty when absent
    pub fn scalar_field(&self, key: &str) -> Result<String, MarshalError> {
        match self.get(key) {
            Some(value) => value.to_scalar_string(key),
            None => Ok(String::new()),
        }
    }

    /// String member, or empty when absent or of any other type
    pub fn lenient_string(&self, key: &str) -> String {
        match self.get(key) {
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        }
    }

    /// Flatten a struct into its string members, dropping everything else
    pub fn string_members(&self) -> BTreeMap<String, String> {
        match self {
            Value::Struct(members) => members
                .iter()
                .filter_map(|(k, v)| match v {
                    Value::String(s) => Some((k.clone(), s.clone())),
                    _ => None,
                })
                .collect(),
            _ => BTreeMap::new(),
        }
    }

    /// Collect the string items of an array, dropping everything else
    pub fn string_items(&self) -> Vec<String> {
        match self {
            Value::Array(items) => items
                .iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.clone()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Struct> for Value {
    fn from(members: Struct) -> Self {
        Value::Struct(members)
    }
}

/// Build a struct value from `key => value` pairs
#[macro_export]
macro_rules! wire_struct {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut members = $crate::rpc::Struct::new();
        $( members.insert(($key).to_string(), $crate::rpc::Value::from($value)); )*
        $crate::rpc::Value::Struct(members)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_json_shapes() {
        let v: Value = serde_json::from_str(r#"{"a": 1, "b": 1.5, "c": "x", "d": false, "e": [1]}"#).unwrap();
        assert_eq!(v.get("a"), Some(&Value::Int(1)));
        assert_eq!(v.get("b"), Some(&Value::Double(1.5)));
        assert_eq!(v.get("c"), Some(&Value::from("x")));
        assert!(v.get("d").is_some_and(Value::is_false));
        assert_eq!(v.get("e"), Some(&Value::Array(vec![Value::Int(1)])));
    }

    #[test]
    fn test_mismatch_names_field() {
        let err = Value::Int(3).as_str("status").unwrap_err();
        assert_eq!(
            err,
            MarshalError::TypeMismatch {
                field: "status".into(),
                expected: "string",
                found: "integer",
            }
        );
    }

    #[test]
    fn test_string_field_defaults_empty() {
        let v = wire_struct! { "token" => "abc" };
        assert_eq!(v.string_field("token").unwrap(), "abc");
        assert_eq!(v.string_field("missing").unwrap(), "");
        assert!(wire_struct! { "token" => 5 }.string_field("token").is_err());
    }

    #[test]
    fn test_string_members_drop_non_strings() {
        let v = wire_struct! {
            "name" => "Alien",
            "nested" => wire_struct! { "x" => "y" },
            "count" => 3,
        };
        let flat = v.string_members();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat["name"], "Alien");
    }

    #[test]
    fn test_scalar_string_normalizes_ints() {
        assert_eq!(Value::Int(0).to_scalar_string("id").unwrap(), "0");
        assert_eq!(Value::from("1953638724").to_scalar_string("id").unwrap(), "1953638724");
        assert!(Value::Array(vec![]).to_scalar_string("id").is_err());
    }

    #[test]
    fn test_as_f64_widens_int() {
        assert_eq!(Value::Int(2).as_f64("seconds").unwrap(), 2.0);
        assert_eq!(Value::Double(0.25).as_f64("seconds").unwrap(), 0.25);
    }
}
