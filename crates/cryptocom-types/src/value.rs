//! Request parameter model
//!
//! Parameters are a closed, JSON-like tagged variant. Maps are always kept in
//! bytewise key order, so anything that walks a [`Params`] (the signature
//! canonicalizer, the JSON body, the query string) sees one deterministic
//! order no matter how the map was built.
//!
//! `Null` is the explicit "unset" marker: it is skipped when the map is
//! serialized and when it is canonicalized, so an optional field that is
//! `None` never reaches the wire.

use rust_decimal::Decimal;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::ParamsError;

/// A single parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Unset optional field
    Null,
    /// Boolean, rendered as `true` / `false`
    Bool(bool),
    /// Integer, rendered in plain decimal
    Int(i64),
    /// Exact decimal, rendered with its own scale and never in exponent form
    Decimal(Decimal),
    /// Text
    String(String),
    /// Ordered list; element order is preserved everywhere
    Array(Vec<ParamValue>),
    /// Nested map
    Map(Params),
}

impl ParamValue {
    /// Returns true for the unset marker
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Text form of a scalar, used for URL query parameters
    ///
    /// Arrays and maps have no query form and return `None`.
    pub fn as_query_value(&self) -> Option<String> {
        match self {
            Self::Null | Self::Array(_) | Self::Map(_) => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Int(i) => Some(i.to_string()),
            Self::Decimal(d) => Some(d.to_string()),
            Self::String(s) => Some(s.clone()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<Params> for ParamValue {
    fn from(value: Params) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

impl TryFrom<serde_json::Value> for ParamValue {
    type Error = ParamsError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;

        Ok(match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else {
                    let text = n.to_string();
                    let decimal = Decimal::from_str(&text)
                        .or_else(|_| Decimal::from_scientific(&text))
                        .map_err(|_| ParamsError::UnsupportedNumber(text))?;
                    Self::Decimal(decimal)
                }
            }
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(
                items
                    .into_iter()
                    .map(ParamValue::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(_) => Self::Map(Params::try_from(value)?),
        })
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            // Sent as a string so the server sees exactly the digits that were signed
            Self::Decimal(d) => serializer.serialize_str(&d.to_string()),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(None)?;
                for item in items.iter().filter(|v| !v.is_null()) {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(params) => params.serialize(serializer),
        }
    }
}

/// Ordered-key parameter map
///
/// # Example
///
/// ```
/// use cryptocom_types::Params;
///
/// let params = Params::new()
///     .with("page", 0)
///     .with("currency", "BTC");
///
/// let keys: Vec<&str> = params.keys().collect();
/// assert_eq!(keys, vec!["currency", "page"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    /// Create an empty parameter map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value for the key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert only when the value is present
    pub fn insert_opt<V: Into<ParamValue>>(&mut self, key: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Check whether a key is present (including explicit `Null`)
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Keys in canonical order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Entries in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries, including explicit `Null`s
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Scalar entries as `(key, value)` pairs for a URL query string
    ///
    /// `Null` entries are skipped. Arrays and maps are sent as compact JSON.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| {
                let value = v
                    .as_query_value()
                    .unwrap_or_else(|| serde_json::to_string(v).unwrap_or_default());
                (k.to_string(), value)
            })
            .collect()
    }
}

impl FromIterator<(String, ParamValue)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl TryFrom<serde_json::Value> for Params {
    type Error = ParamsError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;

        match value {
            Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| ParamValue::try_from(v).map(|v| (k, v)))
                .collect(),
            Value::Null => Err(ParamsError::NotAnObject("null")),
            Value::Bool(_) => Err(ParamsError::NotAnObject("bool")),
            Value::Number(_) => Err(ParamsError::NotAnObject("number")),
            Value::String(_) => Err(ParamsError::NotAnObject("string")),
            Value::Array(_) => Err(ParamsError::NotAnObject("array")),
        }
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present = self.0.values().filter(|v| !v.is_null()).count();
        let mut map = serializer.serialize_map(Some(present))?;
        for (key, value) in self.0.iter().filter(|(_, v)| !v.is_null()) {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_keys_are_sorted_regardless_of_insertion_order() {
        let a = Params::new().with("page", 0).with("currency", "BTC").with("end_ts", 2);
        let b = Params::new().with("end_ts", 2).with("currency", "BTC").with("page", 0);

        assert_eq!(a, b);
        assert_eq!(a.keys().collect::<Vec<_>>(), vec!["currency", "end_ts", "page"]);
    }

    #[test]
    fn test_null_entries_are_not_serialized() {
        let params = Params::new()
            .with("currency", "BTC")
            .with("status", Option::<String>::None);

        assert!(params.contains_key("status"));
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({"currency": "BTC"}));
    }

    #[test]
    fn test_decimal_serializes_as_exact_string() {
        let params = Params::new().with("amount", dec!(1.50));
        assert_eq!(serde_json::to_string(&params).unwrap(), r#"{"amount":"1.50"}"#);
    }

    #[test]
    fn test_from_json_value() {
        let params = Params::try_from(json!({
            "b": [1, "x", true],
            "a": {"z": 1.25, "y": null},
        }))
        .unwrap();

        assert_eq!(
            params.get("b"),
            Some(&ParamValue::Array(vec![
                ParamValue::Int(1),
                ParamValue::String("x".into()),
                ParamValue::Bool(true),
            ]))
        );
        let ParamValue::Map(nested) = params.get("a").unwrap() else {
            panic!("Expected nested map");
        };
        assert_eq!(nested.get("z"), Some(&ParamValue::Decimal(dec!(1.25))));
        assert_eq!(nested.get("y"), Some(&ParamValue::Null));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert_eq!(
            Params::try_from(json!([1, 2])),
            Err(ParamsError::NotAnObject("array"))
        );
    }

    #[test]
    fn test_query_pairs_skip_null() {
        let params = Params::new()
            .with("instrument_name", "BTC_USDT")
            .with("depth", 10)
            .with("missing", ParamValue::Null);

        assert_eq!(
            params.to_query_pairs(),
            vec![
                ("depth".to_string(), "10".to_string()),
                ("instrument_name".to_string(), "BTC_USDT".to_string()),
            ]
        );
    }
}
