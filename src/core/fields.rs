//! Structured key-value fields carried by loggers and entries
//!
//! This module provides:
//! - `FieldValue`: a single structured value
//! - `Fields`: the key-sorted map a `Logger` accumulates and an `Entry` carries

use serde::ser::Error as _;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A value whose JSON form is produced when the entry is rendered.
///
/// Blanket-implemented for every `Serialize` type, so arbitrary structs can be
/// attached with [`FieldValue::serialized`]. A failing `Serialize` impl surfaces
/// as a formatter error, not at attachment time.
pub trait SerializeField: fmt::Debug + Send + Sync {
    fn to_json(&self) -> serde_json::Result<Value>;
}

impl<T> SerializeField for T
where
    T: Serialize + fmt::Debug + Send + Sync,
{
    fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Value type for structured logging fields
#[derive(Debug, Clone)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Null,
    /// Nested arrays and objects
    Json(Value),
    Serialized(Arc<dyn SerializeField>),
}

impl FieldValue {
    /// Attach any serializable value, deferring encoding to render time
    pub fn serialized<T>(value: T) -> Self
    where
        T: Serialize + fmt::Debug + Send + Sync + 'static,
    {
        FieldValue::Serialized(Arc::new(value))
    }

    /// Convert to serde_json::Value for rendering.
    ///
    /// Non-finite floats have no JSON representation and are rejected.
    pub fn to_json_value(&self) -> serde_json::Result<Value> {
        match self {
            FieldValue::String(s) => Ok(Value::String(s.clone())),
            FieldValue::Int(i) => Ok(Value::from(*i)),
            FieldValue::Uint(u) => Ok(Value::from(*u)),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .ok_or_else(|| serde_json::Error::custom(format!("unsupported value: {}", f))),
            FieldValue::Bool(b) => Ok(Value::Bool(*b)),
            FieldValue::Null => Ok(Value::Null),
            FieldValue::Json(v) => Ok(v.clone()),
            FieldValue::Serialized(v) => v.to_json(),
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::String(a), FieldValue::String(b)) => a == b,
            (FieldValue::Int(a), FieldValue::Int(b)) => a == b,
            (FieldValue::Uint(a), FieldValue::Uint(b)) => a == b,
            (FieldValue::Float(a), FieldValue::Float(b)) => a == b,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Null, FieldValue::Null) => true,
            (FieldValue::Json(a), FieldValue::Json(b)) => a == b,
            (FieldValue::Serialized(a), FieldValue::Serialized(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u64> for FieldValue {
    fn from(u: u64) -> Self {
        FieldValue::Uint(u)
    }
}

impl From<u32> for FieldValue {
    fn from(u: u32) -> Self {
        FieldValue::Uint(u as u64)
    }
}

impl From<usize> for FieldValue {
    fn from(u: usize) -> Self {
        FieldValue::Uint(u as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<Value> for FieldValue {
    fn from(v: Value) -> Self {
        FieldValue::Json(v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(FieldValue::Null, Into::into)
    }
}

/// Key-sorted set of structured fields.
///
/// Keys are unique; inserting an existing key replaces its value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    map: BTreeMap<String, FieldValue>,
}

impl Fields {
    /// Create an empty field set
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Add a field, consuming and returning the set
    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.map.insert(key.into(), value.into());
        self
    }

    /// Add a field in place, returning the value it replaced
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<FieldValue>
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.map.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.map.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.map.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// Right-biased union: a new set holding `self` overlaid with `overrides`.
    ///
    /// Neither input is modified.
    #[must_use]
    pub fn merged(&self, overrides: &Fields) -> Fields {
        let mut map = self.map.clone();
        for (key, value) in &overrides.map {
            map.insert(key.clone(), value.clone());
        }
        Fields { map }
    }

    /// Encode every field, leaving `reserved` spare slots for the caller.
    pub fn to_json_map(&self, reserved: usize) -> serde_json::Result<Map<String, Value>> {
        let mut out = Map::with_capacity(self.map.len() + reserved);
        for (key, value) in &self.map {
            out.insert(key.clone(), value.to_json_value()?);
        }
        Ok(out)
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            map: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Fields
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fields_creation() {
        let fields = Fields::new();
        assert!(fields.is_empty());
    }

    #[test]
    fn test_fields_with_values() {
        let fields = Fields::new()
            .with_field("user_id", 123)
            .with_field("username", "john_doe")
            .with_field("active", true);

        assert_eq!(fields.len(), 3);
        assert_eq!(fields.get("user_id"), Some(&FieldValue::Int(123)));
        assert_eq!(fields.keys().collect::<Vec<_>>(), ["active", "user_id", "username"]);
    }

    #[test]
    fn test_merged_right_biased() {
        let base = Fields::from([("a", 1), ("b", 2)]);
        let overrides = Fields::from([("b", 20), ("c", 30)]);

        let merged = base.merged(&overrides);

        assert_eq!(merged.get("a"), Some(&FieldValue::Int(1)));
        assert_eq!(merged.get("b"), Some(&FieldValue::Int(20)));
        assert_eq!(merged.get("c"), Some(&FieldValue::Int(30)));
        assert_eq!(base.get("b"), Some(&FieldValue::Int(2)));
        assert!(!base.contains_key("c"));
    }

    #[test]
    fn test_insert_replaces() {
        let mut fields = Fields::new();
        assert!(fields.insert("k", "v1").is_none());
        assert_eq!(fields.insert("k", "v2"), Some(FieldValue::from("v1")));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_nan_is_unserializable() {
        let err = FieldValue::Float(f64::NAN).to_json_value().unwrap_err();
        assert!(err.to_string().contains("unsupported value: NaN"));
    }

    #[test]
    fn test_serialized_struct() {
        #[derive(Debug, Serialize)]
        struct Request {
            method: &'static str,
            status: u16,
        }

        let value = FieldValue::serialized(Request {
            method: "GET",
            status: 200,
        });
        assert_eq!(
            value.to_json_value().unwrap(),
            json!({"method": "GET", "status": 200})
        );
    }

    #[test]
    fn test_option_and_json_values() {
        assert_eq!(FieldValue::from(None::<i64>), FieldValue::Null);
        assert_eq!(
            FieldValue::from(json!({"nested": [1, 2]})).to_json_value().unwrap(),
            json!({"nested": [1, 2]})
        );
    }

    #[test]
    fn test_to_json_map_fails_on_bad_value() {
        let fields = Fields::new()
            .with_field("ok", 1)
            .with_field("bad", f64::INFINITY);
        assert!(fields.to_json_map(3).is_err());
    }
}
