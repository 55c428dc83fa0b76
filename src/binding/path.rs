//! Path template resolution for `{:name}` placeholders.

use std::collections::BTreeMap;

use super::conformance::conforms;
use super::serialize::{escape_component, serialize, Placement};
use super::value::CallArgs;
use crate::endpoint::descriptor::PLACEHOLDER;
use crate::endpoint::ParamKind;
use crate::{Error, ErrorContext, Result};

/// Substitute every placeholder in `template` with its checked route value.
///
/// A missing or mistyped route value rejects the call; a half-resolved path is
/// never returned.
pub fn resolve(
    template: &str,
    route_params: &BTreeMap<String, ParamKind>,
    args: &CallArgs,
) -> Result<String> {
    let mut resolved = String::with_capacity(template.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let name = name.as_str();

        let kind = route_params.get(name).copied().ok_or_else(|| {
            Error::validation_with_context(
                format!("route param: \"{}\" is not declared", name),
                ErrorContext::new()
                    .with_field_path(format!("route.{}", name))
                    .with_source("path_resolver"),
            )
        })?;

        let value = args.get(name).filter(|v| !v.is_null()).ok_or_else(|| {
            Error::validation_with_context(
                format!("route param: \"{}\" is required but not provided", name),
                ErrorContext::new()
                    .with_field_path(format!("route.{}", name))
                    .with_source("path_resolver"),
            )
        })?;

        if !conforms(value, kind) {
            return Err(Error::validation_with_context(
                format!("route param: \"{}\" is not of type {}", name, kind),
                ErrorContext::new()
                    .with_field_path(format!("route.{}", name))
                    .with_details(format!("expected {}, got {}", kind, value.type_name()))
                    .with_source("path_resolver"),
            ));
        }

        let segment = serialize(value, Placement::Body);
        if segment.is_empty() {
            return Err(Error::validation_with_context(
                format!("route param: \"{}\" must not be empty", name),
                ErrorContext::new()
                    .with_field_path(format!("route.{}", name))
                    .with_source("path_resolver"),
            ));
        }

        resolved.push_str(&template[last..whole.start()]);
        resolved.push_str(&escape_component(&segment));
        last = whole.end();
    }

    resolved.push_str(&template[last..]);
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::ParamValue;

    fn text_route(name: &str) -> BTreeMap<String, ParamKind> {
        [(name.to_string(), ParamKind::Text)].into_iter().collect()
    }

    #[test]
    fn substitutes_placeholder() {
        let args = CallArgs::new().with("id", "T123");
        let path = resolve("/transaction/{:id}", &text_route("id"), &args).unwrap();
        assert_eq!(path, "/transaction/T123");
    }

    #[test]
    fn substitutes_mid_path_placeholders() {
        let routes: BTreeMap<String, ParamKind> = [
            ("code".to_string(), ParamKind::Text),
            ("n".to_string(), ParamKind::Number),
        ]
        .into_iter()
        .collect();
        let args = CallArgs::new().with("code", "PLN_x").with("n", 2i64);
        let path = resolve("/plan/{:code}/page/{:n}/items", &routes, &args).unwrap();
        assert_eq!(path, "/plan/PLN_x/page/2/items");
    }

    #[test]
    fn mistyped_route_value_is_rejected() {
        let args = CallArgs::new().with("id", 123i64);
        let err = resolve("/transaction/{:id}", &text_route("id"), &args).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("is not of type text"));
    }

    #[test]
    fn missing_route_value_is_rejected() {
        let args = CallArgs::new().with("other", "x").with("id", ParamValue::Null);
        let err = resolve("/transaction/{:id}", &text_route("id"), &args).unwrap_err();
        assert!(err.to_string().contains("\"id\" is required"));
    }

    #[test]
    fn segments_are_escaped() {
        let args = CallArgs::new().with("reference", "a/b c");
        let path = resolve(
            "/transaction/verify/{:reference}",
            &text_route("reference"),
            &args,
        )
        .unwrap();
        assert_eq!(path, "/transaction/verify/a%2Fb%20c");
    }

    #[test]
    fn empty_route_value_is_rejected() {
        let args = CallArgs::new().with("id", "");
        let err = resolve("/transaction/{:id}", &text_route("id"), &args).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("\"id\" must not be empty"), "{}", err);
    }
}
