use crate::endpoint::DescriptorError;
use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Parameter or configuration key that caused the error (e.g. "amount", "route.id")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g. expected type)
    pub details: Option<String>,
    /// Source of the error (e.g. "input_binder", "path_resolver")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the Paystack binding.
///
/// `Argument` and `Validation` are produced before any network I/O happens.
/// `Transport`, `Remote` and `UpstreamStatus` come back from the wire.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Endpoint descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),

    #[error("Argument error: {message}{}", format_context(.context))]
    Argument {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    /// Upstream error response rewritten into the API's own message.
    #[error("PaystackError: {message} ({status})")]
    Remote {
        status: u16,
        message: String,
        body: serde_json::Value,
    },

    /// 401/403/404 recognized after the response arrived.
    #[error("{notice}{}", .message.as_ref().map(|m| format!(": {}", m)).unwrap_or_default())]
    UpstreamStatus {
        status: u16,
        notice: String,
        message: Option<String>,
    },
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn argument(msg: impl Into<String>) -> Self {
        Error::Argument {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn argument_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Argument {
            message: msg.into(),
            context,
        }
    }

    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Argument { context, .. }
            | Error::Validation { context, .. }
            | Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }

    /// HTTP status carried by upstream failures.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } | Error::UpstreamStatus { status, .. } => Some(*status),
            Error::Transport(TransportError::Status { status, .. }) => Some(*status),
            Error::Transport(TransportError::Http(e)) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for errors raised before a request ever left the process.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            Error::Argument { .. } | Error::Validation { .. } | Error::Descriptor(_)
        )
    }
}
