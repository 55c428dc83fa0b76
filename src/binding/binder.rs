//! Input binding: defaults, required/optional rules, type checks, and
//! assembly of the query string or body.

use super::conformance::conforms;
use super::serialize::{escape_component, serialize, Placement};
use super::value::{CallArgs, ParamValue};
use crate::endpoint::{EndpointDescriptor, TransportMode};
use crate::{Error, ErrorContext, Result};

/// The parameter half of a request, ready for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundInput {
    /// `k=v&...` with values already escaped.
    Query(String),
    /// JSON object text whose fields are the serialized strings.
    Json(String),
    /// Form fields in declaration order.
    Form(Vec<(String, String)>),
}

/// Absent, null and empty-string values all count as "not provided".
fn is_blank(value: &ParamValue) -> bool {
    match value {
        ParamValue::Null | ParamValue::Structured(serde_json::Value::Null) => true,
        ParamValue::Text(s) => s.is_empty(),
        ParamValue::Structured(serde_json::Value::String(s)) => s.is_empty(),
        _ => false,
    }
}

/// Bind `args` against the descriptor's declared parameters.
///
/// Parameters are visited in declaration order, so the first offending
/// parameter is the one reported.
pub fn bind(descriptor: &EndpointDescriptor, args: &CallArgs) -> Result<BoundInput> {
    let merged = match descriptor.param_defaults {
        Some(ref defaults) => args.merged_over(defaults),
        None => args.clone(),
    };

    let placement = if descriptor.method.carries_body() {
        Placement::Body
    } else {
        Placement::Query
    };

    let mut fields: Vec<(String, String)> = Vec::new();
    for spec in descriptor.params.iter().flatten() {
        let value = match merged.get(&spec.name) {
            Some(v) if !is_blank(v) => v,
            _ if spec.required => {
                return Err(Error::validation_with_context(
                    format!(
                        "param: \"{}\" is required but not provided; please provide as needed",
                        spec.name
                    ),
                    ErrorContext::new()
                        .with_field_path(spec.name.clone())
                        .with_source("input_binder"),
                ));
            }
            _ => continue,
        };

        if !conforms(value, spec.kind) {
            return Err(Error::validation_with_context(
                format!(
                    "param: \"{}\" is not of type {}; please provide as needed",
                    spec.name, spec.kind
                ),
                ErrorContext::new()
                    .with_field_path(spec.name.clone())
                    .with_details(format!("expected {}, got {}", spec.kind, value.type_name()))
                    .with_source("input_binder"),
            ));
        }

        fields.push((spec.name.clone(), serialize(value, placement)));
    }

    Ok(match placement {
        Placement::Query => BoundInput::Query(
            fields
                .iter()
                .map(|(k, v)| format!("{}={}", escape_component(k), v))
                .collect::<Vec<_>>()
                .join("&"),
        ),
        Placement::Body if descriptor.transport_mode == TransportMode::Form => {
            BoundInput::Form(fields)
        }
        Placement::Body => {
            let object: serde_json::Map<String, serde_json::Value> = fields
                .into_iter()
                .map(|(k, v)| (k, serde_json::Value::String(v)))
                .collect();
            BoundInput::Json(serde_json::Value::Object(object).to_string())
        }
    })
}
