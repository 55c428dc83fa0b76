//! Descriptor table error types

/// Errors raised while loading or validating endpoint descriptor tables.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("Failed to load descriptor table from {path}: {reason}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    LoadError {
        path: String,
        reason: String,
        hint: Option<String>,
    },

    #[error("Invalid descriptor '{operation}': {reason}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    InvalidDescriptor {
        operation: String,
        reason: String,
        hint: Option<String>,
    },

    #[error("Operation not found: {operation}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    NotFound {
        operation: String,
        hint: Option<String>,
    },

    #[error("Duplicate operation '{operation}' in descriptor table")]
    Duplicate { operation: String },

    #[error("YAML syntax error: {0}")]
    YamlError(String),

    #[error("JSON syntax error: {0}")]
    JsonError(String),
}

impl DescriptorError {
    /// Attach an actionable hint to the error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        let hint_val = Some(hint.into());
        match self {
            DescriptorError::LoadError { ref mut hint, .. } => *hint = hint_val,
            DescriptorError::InvalidDescriptor { ref mut hint, .. } => *hint = hint_val,
            DescriptorError::NotFound { ref mut hint, .. } => *hint = hint_val,
            _ => (),
        }
        self
    }

    pub(crate) fn invalid(operation: &str, reason: impl Into<String>) -> Self {
        DescriptorError::InvalidDescriptor {
            operation: operation.to_string(),
            reason: reason.into(),
            hint: None,
        }
    }
}
