//! Endpoint descriptor structures
//!
//! A descriptor is the static declaration of one API operation: verb, path
//! template, body encoding and the typed parameters it accepts.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::error::DescriptorError;
use crate::binding::{conforms, ParamValue};

/// `{:name}` placeholder inside a path template.
pub(crate) static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{:(\w+)\}").expect("placeholder pattern is valid"));

/// HTTP verb of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Get,
    Head,
    Delete,
    Post,
    Put,
    Patch,
}

impl HttpVerb {
    /// POST/PUT/PATCH send their parameters in a body; the rest use the query string.
    pub fn carries_body(self) -> bool {
        matches!(self, HttpVerb::Post | HttpVerb::Put | HttpVerb::Patch)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Head => "HEAD",
            HttpVerb::Delete => "DELETE",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a body is encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Json,
    Form,
    #[default]
    None,
}

/// Declared primitive kind of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    #[serde(alias = "string")]
    Text,
    Number,
    #[serde(alias = "date")]
    Timestamp,
    #[serde(alias = "object")]
    Structured,
    Boolean,
}

impl ParamKind {
    pub fn name(self) -> &'static str {
        match self {
            ParamKind::Text => "text",
            ParamKind::Number => "number",
            ParamKind::Timestamp => "timestamp",
            ParamKind::Structured => "structured",
            ParamKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A query/body parameter declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParamKind,
    #[serde(default)]
    pub required: bool,
}

impl ParamSpec {
    pub fn required(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
        }
    }
}

/// Static, immutable definition of one API operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    pub method: HttpVerb,
    pub path: String,
    #[serde(default, rename = "transport")]
    pub transport_mode: TransportMode,
    /// Declared parameters, in declaration order.
    #[serde(default)]
    pub params: Option<Vec<ParamSpec>>,
    #[serde(default)]
    pub param_defaults: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    pub route_params: Option<BTreeMap<String, ParamKind>>,
}

impl EndpointDescriptor {
    pub fn new(method: HttpVerb, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            transport_mode: TransportMode::None,
            params: None,
            param_defaults: None,
            route_params: None,
        }
    }

    pub fn with_transport(mut self, mode: TransportMode) -> Self {
        self.transport_mode = mode;
        self
    }

    pub fn with_param(mut self, spec: ParamSpec) -> Self {
        self.params.get_or_insert_with(Vec::new).push(spec);
        self
    }

    pub fn with_default(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.param_defaults
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value);
        self
    }

    pub fn with_route_param(mut self, name: impl Into<String>, kind: ParamKind) -> Self {
        self.route_params
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), kind);
        self
    }

    /// True when the operation accepts neither parameters nor route parameters.
    pub fn takes_no_arguments(&self) -> bool {
        self.params.is_none() && self.route_params.is_none()
    }

    /// Names of required parameters, in declaration order.
    pub fn required_params(&self) -> Vec<&str> {
        self.params
            .iter()
            .flatten()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect()
    }

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().flatten().find(|p| p.name == name)
    }

    /// Placeholder names referenced by the path template.
    pub fn placeholders(&self) -> BTreeSet<&str> {
        PLACEHOLDER
            .captures_iter(&self.path)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect()
    }

    /// Structural checks applied when a table is loaded.
    pub fn validate(&self, operation: &str) -> Result<(), DescriptorError> {
        if !self.path.starts_with('/') {
            return Err(DescriptorError::invalid(operation, "path must start with '/'")
                .with_hint(format!("got '{}'", self.path)));
        }

        let placeholders = self.placeholders();
        let declared: BTreeSet<&str> = self
            .route_params
            .iter()
            .flat_map(|m| m.keys().map(String::as_str))
            .collect();
        if placeholders != declared {
            return Err(DescriptorError::invalid(
                operation,
                format!(
                    "path placeholders {:?} do not match route_params {:?}",
                    placeholders, declared
                ),
            ));
        }
        if matches!(self.route_params, Some(ref m) if m.is_empty()) {
            return Err(DescriptorError::invalid(
                operation,
                "route_params must be null when the path has no placeholders",
            ));
        }

        let mut seen = BTreeSet::new();
        for spec in self.params.iter().flatten() {
            if !seen.insert(spec.name.as_str()) {
                return Err(DescriptorError::invalid(
                    operation,
                    format!("parameter '{}' is declared twice", spec.name),
                ));
            }
        }

        for (name, value) in self.param_defaults.iter().flatten() {
            let spec = self.param(name).ok_or_else(|| {
                DescriptorError::invalid(
                    operation,
                    format!("default given for undeclared parameter '{}'", name),
                )
            })?;
            let value = ParamValue::from(value.clone());
            if !value.is_null() && !conforms(&value, spec.kind) {
                return Err(DescriptorError::invalid(
                    operation,
                    format!("default for '{}' is not of type {}", name, spec.kind),
                ));
            }
        }

        if self.transport_mode != TransportMode::None && !self.method.carries_body() {
            tracing::debug!(
                operation,
                method = self.method.as_str(),
                "transport mode ignored for a method without a body"
            );
        }

        Ok(())
    }
}
