//! Wire serialization of individual parameter values.
//!
//! The same value serializes differently depending on where it lands: body
//! fields carry the plain string form, query parameters are additionally
//! percent-escaped.

use chrono::SecondsFormat;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::value::ParamValue;

/// Characters left unescaped: the `encodeURIComponent` unreserved set.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Where a serialized value is placed in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Query,
    Body,
}

/// Serialize one value for the given placement.
pub fn serialize(value: &ParamValue, placement: Placement) -> String {
    let raw = wire_string(value);
    match placement {
        Placement::Query => escape_component(&raw),
        Placement::Body => raw,
    }
}

/// Percent-escape a query or path component.
pub fn escape_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

fn wire_string(value: &ParamValue) -> String {
    match value {
        ParamValue::Null => "null".to_string(),
        ParamValue::Text(s) => s.clone(),
        ParamValue::Integer(i) => i.to_string(),
        ParamValue::Float(f) => f.to_string(),
        ParamValue::Boolean(b) => b.to_string(),
        ParamValue::Timestamp(ts) => {
            let iso = ts.to_rfc3339_opts(SecondsFormat::Millis, true);
            iso.strip_suffix('Z').map(str::to_string).unwrap_or(iso)
        }
        ParamValue::Structured(v) => match v {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => "null".to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            other => other.to_string(),
        },
    }
}
