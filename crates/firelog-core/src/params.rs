// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Typed event parameters.
//
// Web content sends parameters as arbitrary JSON. Native analytics SDKs only
// accept three scalar kinds (64-bit integer, double, string), so everything
// else is dropped during conversion. An empty result is never materialised:
// conversion yields `None` instead, which the SDKs treat as "no parameters".

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A single parameter value in the native analytics format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    String(String),
}

impl ParamValue {
    /// Convert a JSON value, returning `None` for unsupported variants
    /// (null, booleans, arrays and nested objects).
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Self::from_number(n),
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Integers that fit `i64` stay integers; anything else (fractional
    /// values, or unsigned values above `i64::MAX`) becomes a float.
    fn from_number(n: &Number) -> Option<Self> {
        match n.as_i64() {
            Some(i) => Some(Self::Int(i)),
            None => n.as_f64().map(Self::Float),
        }
    }

    /// Short type name, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

/// Unordered, strongly-typed parameter container handed to the analytics
/// client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamSet {
    values: HashMap<String, ParamValue>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a JSON object, keeping only integer, float and string entries.
    ///
    /// Returns `None` when no entry survives.
    pub fn from_json_object(object: &Map<String, Value>) -> Option<Self> {
        let mut set = Self::new();
        for (key, value) in object {
            match ParamValue::from_json(value) {
                Some(converted) => {
                    tracing::trace!(key = %key, kind = converted.kind(), "keeping parameter");
                    set.insert(key.clone(), converted);
                }
                None => tracing::trace!(key = %key, "dropping unsupported parameter value"),
            }
        }
        set.into_non_empty()
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// `None` for an empty set, so "no parameters" has a single representation.
    pub fn into_non_empty(self) -> Option<Self> {
        if self.is_empty() { None } else { Some(self) }
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParamSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn scalar_values_keep_their_type() {
        assert_eq!(ParamValue::from_json(&json!(3)), Some(ParamValue::Int(3)));
        assert_eq!(ParamValue::from_json(&json!(-7)), Some(ParamValue::Int(-7)));
        assert_eq!(
            ParamValue::from_json(&json!(9.99)),
            Some(ParamValue::Float(9.99))
        );
        assert_eq!(
            ParamValue::from_json(&json!("USD")),
            Some(ParamValue::String("USD".into()))
        );
    }

    #[test]
    fn float_with_zero_fraction_stays_float() {
        let value: Value = serde_json::from_str("2.0").unwrap();
        assert_eq!(ParamValue::from_json(&value), Some(ParamValue::Float(2.0)));
    }

    #[test]
    fn unsigned_above_i64_becomes_float() {
        let value = json!(u64::MAX);
        assert_eq!(
            ParamValue::from_json(&value),
            Some(ParamValue::Float(u64::MAX as f64))
        );
    }

    #[test]
    fn unsupported_values_are_rejected() {
        for value in [json!(null), json!(true), json!(false), json!([1, 2]), json!({"a": 1})] {
            assert_eq!(ParamValue::from_json(&value), None, "value {value}");
        }
    }

    #[test]
    fn from_json_object_filters_entries() {
        let map = object(json!({
            "qty": 3,
            "flag": true,
            "currency": "USD",
            "nested": {"a": 1},
        }));
        let set = ParamSet::from_json_object(&map).expect("non-empty");
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("qty"), Some(&ParamValue::Int(3)));
        assert_eq!(set.get("currency"), Some(&ParamValue::String("USD".into())));
        assert!(!set.contains_key("flag"));
        assert!(!set.contains_key("nested"));
    }

    #[test]
    fn from_json_object_empty_result_is_none() {
        let map = object(json!({"flag": true, "n": null, "list": [1, 2]}));
        assert!(ParamSet::from_json_object(&map).is_none());
        assert!(ParamSet::from_json_object(&Map::new()).is_none());
    }

    #[test]
    fn insert_replaces_existing_key() {
        let mut set = ParamSet::new();
        set.insert("level", 1_i64);
        set.insert("level", "boss");
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("level").map(ParamValue::kind), Some("string"));
    }

    #[test]
    fn serializes_as_plain_object() {
        let set: ParamSet = [("qty", ParamValue::Int(3))].into_iter().collect();
        assert_eq!(serde_json::to_value(&set).unwrap(), json!({"qty": 3}));
    }
}
