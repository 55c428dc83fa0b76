use arc_swap::ArcSwap;
use std::sync::Arc;

use crate::binding::{prepare, CallArgs, PreparedRequest};
use crate::endpoint::{EndpointDescriptor, EndpointTable};
use crate::transport::{ApiResponse, Transport, TransportConfig, TransportOptions};
use crate::{Error, Result};

/// Default number of in-flight calls for [`PaystackClient::call_batch`].
pub const DEFAULT_BATCH_CONCURRENCY: usize = 10;

/// The transport currently used for new calls.
struct Active {
    transport: Arc<dyn Transport>,
}

/// Client for the Paystack REST API.
///
/// Every operation in the descriptor table is callable by name through
/// [`call`](Self::call); built-in operations also have a named method.
pub struct PaystackClient {
    pub(crate) table: Arc<EndpointTable>,
    active: ArcSwap<Active>,
    pub(crate) batch_concurrency: usize,
}

/// One entry of a [`PaystackClient::call_batch`] request.
#[derive(Debug, Clone)]
pub struct BatchCall {
    pub operation: String,
    pub args: CallArgs,
}

impl BatchCall {
    pub fn new(operation: impl Into<String>, args: CallArgs) -> Self {
        Self {
            operation: operation.into(),
            args,
        }
    }
}

impl PaystackClient {
    /// Create a client with the built-in operations.
    ///
    /// `environment` is matched against `development`, `local` and `dev`
    /// (case-insensitively) to pick the sandbox; anything else is live.
    pub fn new(secret_key: impl Into<String>, environment: &str) -> Result<Self> {
        crate::client::builder::PaystackClientBuilder::new()
            .secret_key(secret_key)
            .environment(environment)
            .build()
    }

    pub fn builder() -> crate::client::builder::PaystackClientBuilder {
        crate::client::builder::PaystackClientBuilder::new()
    }

    pub(crate) fn from_parts(
        table: Arc<EndpointTable>,
        transport: Arc<dyn Transport>,
        batch_concurrency: usize,
    ) -> Self {
        Self {
            table,
            active: ArcSwap::from_pointee(Active { transport }),
            batch_concurrency: batch_concurrency.max(1),
        }
    }

    /// Invoke `operation` with `args`.
    ///
    /// An empty `args` is the empty call, accepted only by operations that
    /// declare no parameters. Argument and validation failures are returned
    /// before any request is sent.
    pub async fn call(&self, operation: &str, args: CallArgs) -> Result<ApiResponse> {
        let request = self.prepare(operation, &args)?;
        self.send(&request).await
    }

    /// Invoke `operation` with loosely-typed JSON arguments.
    ///
    /// `null` is the empty call; any non-object value is an argument error.
    pub async fn call_json(
        &self,
        operation: &str,
        args: serde_json::Value,
    ) -> Result<ApiResponse> {
        let args = CallArgs::from_json(args)?;
        self.call(operation, args).await
    }

    /// Build the request for `operation` without sending it.
    pub fn prepare(&self, operation: &str, args: &CallArgs) -> Result<PreparedRequest> {
        let descriptor = self.table.resolve(operation)?;
        prepare(operation, descriptor, Some(args))
    }

    /// Send an already prepared request through the active transport.
    pub async fn send(&self, request: &PreparedRequest) -> Result<ApiResponse> {
        let transport = Arc::clone(&self.active.load().transport);
        transport.send(request).await
    }

    /// Run several calls concurrently, at most `concurrency_limit` at a time.
    ///
    /// Results preserve input order.
    pub async fn call_batch(
        &self,
        calls: Vec<BatchCall>,
        concurrency_limit: Option<usize>,
    ) -> Vec<Result<ApiResponse>> {
        use futures::StreamExt;

        let n = calls.len();
        if n == 0 {
            return Vec::new();
        }

        let limit = concurrency_limit.unwrap_or(self.batch_concurrency).max(1);
        let mut out: Vec<Option<Result<ApiResponse>>> = (0..n).map(|_| None).collect();

        let results: Vec<(usize, Result<ApiResponse>)> =
            futures::stream::iter(calls.into_iter().enumerate())
                .map(|(idx, c)| async move { (idx, self.call(&c.operation, c.args).await) })
                .buffer_unordered(limit)
                .collect()
                .await;

        for (idx, r) in results {
            out[idx] = Some(r);
        }

        out.into_iter()
            .map(|o| {
                o.unwrap_or_else(|| Err(Error::argument("batch result missing")))
            })
            .collect()
    }

    /// Layer `options` over the active configuration.
    ///
    /// The new transport replaces the old one atomically. Calls already in
    /// flight finish on the transport they started with, and configurations
    /// obtained earlier through [`config`](Self::config) are unaffected.
    pub fn reconfigure(&self, options: TransportOptions) -> Result<()> {
        loop {
            let current = self.active.load_full();
            let next = Arc::new(Active {
                transport: current.transport.extend(&options)?,
            });
            let prev = self.active.compare_and_swap(&current, next);
            if Arc::ptr_eq(&*prev, &current) {
                tracing::debug!(
                    base_url = %self.active.load().transport.config().base_url,
                    "paystack client reconfigured"
                );
                return Ok(());
            }
        }
    }

    /// Snapshot of the active transport configuration.
    pub fn config(&self) -> TransportConfig {
        self.active.load().transport.config().clone()
    }

    pub fn table(&self) -> &EndpointTable {
        &self.table
    }

    /// Operation names, sorted.
    pub fn operations(&self) -> Vec<&str> {
        self.table.operations().collect()
    }

    pub fn descriptor(&self, operation: &str) -> Option<&EndpointDescriptor> {
        self.table.get(operation).map(|d| d.as_ref())
    }

    /// Required parameter names of `operation`, in declaration order.
    pub fn required_params(&self, operation: &str) -> Result<Vec<&str>> {
        Ok(self.table.resolve(operation)?.required_params())
    }
}
