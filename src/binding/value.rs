//! Caller-supplied argument values.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::{Error, ErrorContext, Result};

/// A single argument value as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
    /// Arbitrary JSON (objects, arrays, or scalars passed as structured data).
    Structured(serde_json::Value),
}

impl ParamValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    /// Type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Null => "null",
            ParamValue::Text(_) => "text",
            ParamValue::Integer(_) => "integer",
            ParamValue::Float(_) => "float",
            ParamValue::Boolean(_) => "boolean",
            ParamValue::Timestamp(_) => "timestamp",
            ParamValue::Structured(_) => "structured",
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Integer(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Integer(i64::from(v))
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Integer(i64::from(v))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Boolean(v)
    }
}

impl From<DateTime<Utc>> for ParamValue {
    fn from(v: DateTime<Utc>) -> Self {
        ParamValue::Timestamp(v)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(ParamValue::Null, Into::into)
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value;
        match v {
            Value::Null => ParamValue::Null,
            Value::Bool(b) => ParamValue::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ParamValue::Integer(i),
                None => n
                    .as_f64()
                    .map_or(ParamValue::Structured(Value::Number(n)), ParamValue::Float),
            },
            Value::String(s) => ParamValue::Text(s),
            other => ParamValue::Structured(other),
        }
    }
}

/// Arguments for a single call, keyed by parameter or route-parameter name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    values: BTreeMap<String, ParamValue>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert only when `value` is `Some`; `None` leaves the key absent.
    pub fn with_opt<T: Into<ParamValue>>(mut self, name: impl Into<String>, value: Option<T>) -> Self {
        if let Some(v) = value {
            self.insert(name, v);
        }
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
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

    /// Convert loosely-typed JSON into call arguments.
    ///
    /// `null` means "no arguments". Anything other than an object is rejected
    /// with an argument error before any further checks run.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Null => Ok(Self::new()),
            serde_json::Value::Object(map) => Ok(map
                .into_iter()
                .map(|(k, v)| (k, ParamValue::from(v)))
                .collect()),
            other => Err(Error::argument_with_context(
                "call arguments must be a key/value mapping",
                ErrorContext::new()
                    .with_details(format!("got {}", json_kind(&other)))
                    .with_source("method_factory"),
            )),
        }
    }

    /// Layer `self` over `defaults`; values already present win.
    pub(crate) fn merged_over(&self, defaults: &BTreeMap<String, serde_json::Value>) -> CallArgs {
        let mut merged: BTreeMap<String, ParamValue> = defaults
            .iter()
            .map(|(k, v)| (k.clone(), ParamValue::from(v.clone())))
            .collect();
        merged.extend(self.values.iter().map(|(k, v)| (k.clone(), v.clone())));
        CallArgs { values: merged }
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for CallArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
