//! Request preparation: the per-operation pipeline that turns caller
//! arguments into a wire-ready request without doing any I/O.

use super::binder::{bind, BoundInput};
use super::path::resolve;
use super::value::CallArgs;
use crate::endpoint::{EndpointDescriptor, HttpVerb, TransportMode};
use crate::{Error, ErrorContext, Result};

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Encoded request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// JSON object text.
    Json(String),
    /// Unescaped form fields; the transport encodes them.
    Form(Vec<(String, String)>),
}

/// Everything needed to put one call on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub operation: String,
    pub method: HttpVerb,
    /// Path with placeholders substituted, relative to the base URL.
    pub path: String,
    /// Pre-escaped query string, without the leading `?`.
    pub query: Option<String>,
    pub body: Option<RequestBody>,
    /// Per-call headers layered over the transport defaults.
    pub headers: Vec<(String, String)>,
}

impl PreparedRequest {
    /// Path plus query string.
    pub fn path_and_query(&self) -> String {
        match self.query {
            Some(ref q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Build the request for `operation`.
///
/// `None` and an empty mapping are both the empty call, which only
/// operations without parameters accept.
pub fn prepare(
    operation: &str,
    descriptor: &EndpointDescriptor,
    args: Option<&CallArgs>,
) -> Result<PreparedRequest> {
    let mut path = descriptor.path.clone();
    let mut query = None;
    let mut body = None;

    match args.filter(|a| !a.is_empty()) {
        None if !descriptor.takes_no_arguments() => {
            return Err(Error::argument_with_context(
                "arguments required but none given",
                ErrorContext::new()
                    .with_details(format!("operation '{}' declares parameters", operation))
                    .with_source("method_factory"),
            ));
        }
        None => {}
        Some(args) => {
            if descriptor.params.is_some() {
                match bind(descriptor, args)? {
                    BoundInput::Query(q) if q.is_empty() => {}
                    BoundInput::Query(q) => query = Some(q),
                    BoundInput::Json(text) => body = Some(RequestBody::Json(text)),
                    BoundInput::Form(fields) => body = Some(RequestBody::Form(fields)),
                }
            }
            if let Some(ref routes) = descriptor.route_params {
                path = resolve(&descriptor.path, routes, args)?;
            }
        }
    }

    let content_type = match (descriptor.transport_mode, &body) {
        (TransportMode::Json, _) => Some(CONTENT_TYPE_JSON),
        (TransportMode::Form, _) => Some(CONTENT_TYPE_FORM),
        (TransportMode::None, Some(RequestBody::Json(_))) => Some(CONTENT_TYPE_JSON),
        (TransportMode::None, _) => None,
    };
    let headers = content_type
        .map(|ct| vec![("Content-Type".to_string(), ct.to_string())])
        .unwrap_or_default();

    tracing::debug!(
        operation = operation,
        method = %descriptor.method,
        path = %path,
        has_query = query.is_some(),
        has_body = body.is_some(),
        "prepared request"
    );

    Ok(PreparedRequest {
        operation: operation.to_string(),
        method: descriptor.method,
        path,
        query,
        body,
        headers,
    })
}

/// Like [`prepare`], for loosely-typed JSON arguments.
pub fn prepare_json(
    operation: &str,
    descriptor: &EndpointDescriptor,
    args: serde_json::Value,
) -> Result<PreparedRequest> {
    let args = CallArgs::from_json(args)?;
    prepare(operation, descriptor, Some(&args))
}
