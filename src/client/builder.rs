use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::client::core::{PaystackClient, DEFAULT_BATCH_CONCURRENCY};
use crate::endpoint::EndpointTable;
use crate::transport::{
    Environment, HookChain, HttpTransport, ResponseHook, Transport, TransportConfig,
};
use crate::{Error, ErrorContext, Result};

pub const ENV_SECRET_KEY: &str = "PAYSTACK_SECRET_KEY";
pub const ENV_ENVIRONMENT: &str = "PAYSTACK_ENV";
pub const ENV_TIMEOUT_SECS: &str = "PAYSTACK_HTTP_TIMEOUT_SECS";
pub const ENV_PROXY_URL: &str = "PAYSTACK_PROXY_URL";
pub const ENV_BATCH_CONCURRENCY: &str = "PAYSTACK_BATCH_CONCURRENCY";

/// Builder for [`PaystackClient`].
///
/// Anything not set explicitly falls back to the `PAYSTACK_*` environment
/// variables, then to defaults.
pub struct PaystackClientBuilder {
    secret_key: Option<String>,
    environment: Option<String>,
    /// Override base URL (primarily for testing with mock servers)
    base_url_override: Option<String>,
    timeout: Option<Duration>,
    proxy: Option<String>,
    user_agent: Option<String>,
    headers: BTreeMap<String, String>,
    hooks: Vec<Arc<dyn ResponseHook>>,
    status_notices: bool,
    table: Option<EndpointTable>,
    extra_tables: Vec<EndpointTable>,
    transport: Option<Arc<dyn Transport>>,
    batch_concurrency: Option<usize>,
}

impl PaystackClientBuilder {
    pub fn new() -> Self {
        Self {
            secret_key: None,
            environment: None,
            base_url_override: None,
            timeout: None,
            proxy: None,
            user_agent: None,
            headers: BTreeMap::new(),
            hooks: Vec::new(),
            status_notices: true,
            table: None,
            extra_tables: Vec::new(),
            transport: None,
            batch_concurrency: None,
        }
    }

    pub fn secret_key(mut self, key: impl Into<String>) -> Self {
        self.secret_key = Some(key.into());
        self
    }

    /// Environment name; `development`, `local` and `dev` select the sandbox.
    pub fn environment(mut self, name: impl Into<String>) -> Self {
        self.environment = Some(name.into());
        self
    }

    /// Override the environment's base URL.
    ///
    /// This is primarily for testing with mock servers.
    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.proxy = Some(url.into());
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Extra default header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Append a hook after the default ones.
    pub fn hook(mut self, hook: Arc<dyn ResponseHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Fail calls answered with 401, 403 or 404 with a descriptive notice.
    /// Enabled by default; when disabled those statuses surface as ordinary
    /// upstream errors.
    pub fn status_notices(mut self, enable: bool) -> Self {
        self.status_notices = enable;
        self
    }

    /// Replace the built-in operations with `table`.
    pub fn table(mut self, table: EndpointTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Add operations on top of the base table. Name collisions fail `build`.
    pub fn extra_table(mut self, table: EndpointTable) -> Self {
        self.extra_tables.push(table);
        self
    }

    /// Use a custom transport instead of the HTTP one. Transport settings on
    /// this builder are then ignored.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn batch_concurrency(mut self, n: usize) -> Self {
        self.batch_concurrency = Some(n.max(1));
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<PaystackClient> {
        let mut table = match self.table {
            Some(table) => table,
            None => (*EndpointTable::builtin()?).clone(),
        };
        for extra in self.extra_tables {
            table.merge(extra)?;
        }

        let batch_concurrency = self
            .batch_concurrency
            .or_else(|| env_parse::<usize>(ENV_BATCH_CONCURRENCY))
            .unwrap_or(DEFAULT_BATCH_CONCURRENCY);

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => {
                let config = Self::transport_config(
                    self.secret_key,
                    self.environment,
                    self.base_url_override,
                    self.timeout,
                    self.proxy,
                    self.user_agent,
                    self.headers,
                )?;
                let mut hooks = HookChain::paystack_defaults(self.status_notices);
                for hook in self.hooks {
                    hooks = hooks.with(hook);
                }
                Arc::new(HttpTransport::new(config, hooks)?)
            }
        };

        tracing::debug!(
            operations = table.len(),
            base_url = %transport.config().base_url,
            "paystack client built"
        );

        Ok(PaystackClient::from_parts(
            Arc::new(table),
            transport,
            batch_concurrency,
        ))
    }

    fn transport_config(
        secret_key: Option<String>,
        environment: Option<String>,
        base_url_override: Option<String>,
        timeout: Option<Duration>,
        proxy: Option<String>,
        user_agent: Option<String>,
        headers: BTreeMap<String, String>,
    ) -> Result<TransportConfig> {
        let secret_key = secret_key
            .or_else(|| std::env::var(ENV_SECRET_KEY).ok())
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "secret key not set",
                    ErrorContext::new()
                        .with_field_path("secret_key")
                        .with_details(format!(
                            "pass it to the builder or set {}",
                            ENV_SECRET_KEY
                        ))
                        .with_source("client_builder"),
                )
            })?;

        let environment = environment
            .or_else(|| std::env::var(ENV_ENVIRONMENT).ok())
            .map(|name| Environment::from_name(&name))
            .unwrap_or_default();

        let mut config = TransportConfig::new(&secret_key, environment);
        if let Some(url) = base_url_override {
            config.base_url = url;
        }
        if let Some(t) = timeout.or_else(|| env_parse::<u64>(ENV_TIMEOUT_SECS).map(Duration::from_secs)) {
            config.timeout = t;
        }
        config.proxy = proxy.or_else(|| std::env::var(ENV_PROXY_URL).ok());
        config.user_agent = user_agent;
        for (name, value) in headers {
            config.set_header(name, value);
        }
        Ok(config)
    }
}

impl Default for PaystackClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.trim().parse::<T>().ok())
}
