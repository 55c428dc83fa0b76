//! Type conformance between caller values and declared parameter kinds.

use super::value::ParamValue;
use crate::endpoint::ParamKind;

/// Does `value` satisfy the declared `kind`?
///
/// Null never reaches this check; the binder handles absence first. A
/// `Structured` parameter accepts any non-null value.
pub fn conforms(value: &ParamValue, kind: ParamKind) -> bool {
    match (kind, value) {
        (_, ParamValue::Null) => false,
        (ParamKind::Text, ParamValue::Text(_)) => true,
        (ParamKind::Number, ParamValue::Integer(_)) => true,
        (ParamKind::Number, ParamValue::Float(f)) => f.is_finite(),
        (ParamKind::Timestamp, ParamValue::Timestamp(_)) => true,
        (ParamKind::Boolean, ParamValue::Boolean(_)) => true,
        (ParamKind::Structured, _) => true,
        // JSON-sourced scalars wrapped as structured values still carry their own kind.
        (ParamKind::Text, ParamValue::Structured(v)) => v.is_string(),
        (ParamKind::Number, ParamValue::Structured(v)) => v.is_number(),
        (ParamKind::Boolean, ParamValue::Structured(v)) => v.is_boolean(),
        _ => false,
    }
}
