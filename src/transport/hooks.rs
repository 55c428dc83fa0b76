//! Request/response hooks run by the transport around every exchange.
//!
//! Hooks run in registration order. `after_response` sees every response,
//! successful or not, before the chain applies its 401/403/404 notice;
//! `on_error` sees every failure, including those raised by an
//! `after_response` or by the notice.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use super::{ApiResponse, TransportError};
use crate::binding::PreparedRequest;
use crate::{Error, Result};

#[async_trait]
pub trait ResponseHook: Send + Sync {
    fn name(&self) -> &str;

    /// Runs before the request is sent; may adjust it or abort the call.
    async fn before_send(&self, _request: &mut PreparedRequest) -> Result<()> {
        Ok(())
    }

    async fn after_response(
        &self,
        _request: &PreparedRequest,
        response: ApiResponse,
    ) -> Result<ApiResponse> {
        Ok(response)
    }

    async fn on_error(&self, _request: &PreparedRequest, error: Error) -> Error {
        error
    }
}

/// Ordered list of hooks, plus the optional 401/403/404 notice applied once
/// every hook has seen the response.
#[derive(Clone, Default)]
pub struct HookChain {
    hooks: Vec<Arc<dyn ResponseHook>>,
    status_notices: bool,
}

impl HookChain {
    pub fn new() -> Self {
        Self {
            hooks: Vec::new(),
            status_notices: false,
        }
    }

    /// The default chain: upstream error rewriting, plus 401/403/404 notices
    /// when `status_notices` is set.
    pub fn paystack_defaults(status_notices: bool) -> Self {
        Self::new()
            .with(Arc::new(PaystackErrorHook))
            .with_status_notices(status_notices)
    }

    pub fn with_status_notices(mut self, enable: bool) -> Self {
        self.status_notices = enable;
        self
    }

    pub fn status_notices(&self) -> bool {
        self.status_notices
    }

    pub fn with(mut self, hook: Arc<dyn ResponseHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// A new chain with `more` appended; `self` is unchanged.
    pub fn extended(&self, more: &[Arc<dyn ResponseHook>]) -> Self {
        let mut hooks = self.hooks.clone();
        hooks.extend(more.iter().cloned());
        Self {
            hooks,
            status_notices: self.status_notices,
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub async fn before_send(&self, request: &mut PreparedRequest) -> Result<()> {
        for hook in &self.hooks {
            hook.before_send(request).await?;
        }
        Ok(())
    }

    pub async fn after_response(
        &self,
        request: &PreparedRequest,
        mut response: ApiResponse,
    ) -> Result<ApiResponse> {
        for hook in &self.hooks {
            response = hook.after_response(request, response).await?;
        }
        if self.status_notices {
            StatusNotice::check(request, response)
        } else {
            Ok(response)
        }
    }

    pub async fn on_error(&self, request: &PreparedRequest, mut error: Error) -> Error {
        for hook in &self.hooks {
            error = hook.on_error(request, error).await;
        }
        error
    }
}

impl fmt::Debug for HookChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookChain")
            .field("hooks", &self.names())
            .field("status_notices", &self.status_notices)
            .finish()
    }
}

/// Rewrites upstream error responses into [`Error::Remote`], carrying the
/// API's own `message` and the status code.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaystackErrorHook;

#[async_trait]
impl ResponseHook for PaystackErrorHook {
    fn name(&self) -> &str {
        "paystack_error"
    }

    async fn on_error(&self, _request: &PreparedRequest, error: Error) -> Error {
        match error {
            Error::Transport(TransportError::Status { status, reason, body }) => {
                match body.get("message").and_then(|m| m.as_str()) {
                    Some(message) => Error::Remote {
                        status,
                        message: message.to_string(),
                        body,
                    },
                    None => Error::Transport(TransportError::Status { status, reason, body }),
                }
            }
            other => other,
        }
    }
}

/// Recognizes 401, 403 and 404 and fails the call with a descriptive notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusNotice;

impl StatusNotice {
    pub fn notice(status: u16) -> Option<&'static str> {
        match status {
            401 => Some("Bearer Authorization header may not have been set: Unauthorized (401)"),
            403 => Some(
                "Request endpoint requires further priviledges to be accessed: Forbidden (403)",
            ),
            404 => Some("Request endpoint does not exist: Not Found (404)"),
            _ => None,
        }
    }

    /// Pass `response` through, or fail with its notice.
    pub fn check(request: &PreparedRequest, response: ApiResponse) -> Result<ApiResponse> {
        let Some(notice) = Self::notice(response.status) else {
            return Ok(response);
        };
        tracing::warn!(
            http_status = response.status,
            operation = %request.operation,
            path = %request.path,
            "{}",
            notice
        );
        Err(Error::UpstreamStatus {
            status: response.status,
            notice: notice.to_string(),
            message: response.message().map(str::to_string),
        })
    }
}
