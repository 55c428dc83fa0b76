//! Transport configuration and additive reconfiguration.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::hooks::ResponseHook;
use crate::{Error, ErrorContext, Result};

pub const SANDBOX_BASE_URL: &str = "https://api.paystack.co";
pub const LIVE_BASE_URL: &str = "https://api.paystack.co";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

static SANDBOX_NAMES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:development|local|dev)$").expect("environment pattern is valid")
});

/// Deployment environment, selecting the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Sandbox,
    Live,
}

impl Environment {
    /// `development`, `local` and `dev` (any case) select the sandbox; any
    /// other name is live.
    pub fn from_name(name: &str) -> Self {
        if SANDBOX_NAMES.is_match(name.trim()) {
            Environment::Sandbox
        } else {
            Environment::Live
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_BASE_URL,
            Environment::Live => LIVE_BASE_URL,
        }
    }
}

/// Immutable configuration of one transport instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub base_url: String,
    /// Default headers sent with every request.
    pub headers: BTreeMap<String, String>,
    pub timeout: Duration,
    pub proxy: Option<String>,
    pub user_agent: Option<String>,
}

impl TransportConfig {
    /// Base configuration: environment base URL plus the fixed headers.
    pub fn new(secret_key: &str, environment: Environment) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Cache-Control".to_string(), "no-cache".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers.insert("Authorization".to_string(), bearer(secret_key));
        Self {
            base_url: environment.base_url().to_string(),
            headers,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            proxy: None,
            user_agent: None,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set a header, replacing any existing header of the same name in any case.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|k, _| !k.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
    }

    /// Layer `options` over this configuration, returning a new one.
    pub fn extend(&self, options: &TransportOptions) -> Result<TransportConfig> {
        let mut next = self.clone();
        if let Some(ref url) = options.base_url {
            next.base_url = url.clone();
        }
        if let Some(ref key) = options.secret_key {
            next.set_header("Authorization", bearer(key));
        }
        for (name, value) in &options.headers {
            next.set_header(name.clone(), value.clone());
        }
        if let Some(timeout) = options.timeout {
            next.timeout = timeout;
        }
        if let Some(ref proxy) = options.proxy {
            next.proxy = Some(proxy.clone());
        }
        if let Some(ref agent) = options.user_agent {
            next.user_agent = Some(agent.clone());
        }
        next.validate()?;
        Ok(next)
    }

    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid base URL '{}'", self.base_url),
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(e.to_string())
                    .with_source("transport_config"),
            )
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::configuration_with_context(
                format!("unsupported base URL scheme '{}'", parsed.scheme()),
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_source("transport_config"),
            ));
        }
        if self.timeout.is_zero() {
            return Err(Error::configuration_with_context(
                "timeout must be greater than zero",
                ErrorContext::new()
                    .with_field_path("timeout")
                    .with_source("transport_config"),
            ));
        }
        Ok(())
    }
}

fn bearer(secret_key: &str) -> String {
    format!("Bearer {}", secret_key)
}

/// Options layered over an existing configuration by `reconfigure`.
///
/// Headers and hooks are additive; scalar fields replace the current value
/// only when set.
#[derive(Clone, Default)]
pub struct TransportOptions {
    pub base_url: Option<String>,
    pub secret_key: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub timeout: Option<Duration>,
    pub proxy: Option<String>,
    pub user_agent: Option<String>,
    pub hooks: Vec<Arc<dyn ResponseHook>>,
}

impl TransportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn secret_key(mut self, key: impl Into<String>) -> Self {
        self.secret_key = Some(key.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
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

    pub fn hook(mut self, hook: Arc<dyn ResponseHook>) -> Self {
        self.hooks.push(hook);
        self
    }
}

impl fmt::Debug for TransportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportOptions")
            .field("base_url", &self.base_url)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("headers", &self.headers)
            .field("timeout", &self.timeout)
            .field("proxy", &self.proxy)
            .field("user_agent", &self.user_agent)
            .field("hooks", &self.hooks.iter().map(|h| h.name()).collect::<Vec<_>>())
            .finish()
    }
}
