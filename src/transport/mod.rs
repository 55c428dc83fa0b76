//! Transport layer: puts prepared requests on the wire.

pub mod config;
pub mod hooks;
pub mod http;

pub use config::{Environment, TransportConfig, TransportOptions};
pub use hooks::{HookChain, PaystackErrorHook, ResponseHook, StatusNotice};
pub use http::HttpTransport;

use async_trait::async_trait;
use std::sync::Arc;

use crate::binding::PreparedRequest;
use crate::Result;

/// Something that can execute a prepared request.
///
/// Implementations are immutable; reconfiguration produces a new transport
/// through [`Transport::extend`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &PreparedRequest) -> Result<ApiResponse>;

    fn config(&self) -> &TransportConfig;

    /// A new transport with `options` layered over this one's configuration.
    fn extend(&self, options: &TransportOptions) -> Result<Arc<dyn Transport>>;
}

/// A completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: reqwest::header::HeaderMap,
    /// Parsed JSON body; `Null` when empty, a JSON string when not JSON.
    pub body: serde_json::Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Top-level `message` field of the body.
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(|m| m.as_str())
    }

    /// Top-level `data` field of the body.
    pub fn data(&self) -> Option<&serde_json::Value> {
        self.body.get("data")
    }

    pub(crate) fn parse_body(bytes: &[u8]) -> serde_json::Value {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return serde_json::Value::Null;
        }
        serde_json::from_slice(bytes).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} {reason}")]
    Status {
        status: u16,
        reason: String,
        body: serde_json::Value,
    },

    #[error("Transport error: {0}")]
    Other(String),
}
