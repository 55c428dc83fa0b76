use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Proxy};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::config::{TransportConfig, TransportOptions};
use super::hooks::HookChain;
use super::{ApiResponse, Transport, TransportError};
use crate::binding::{PreparedRequest, RequestBody};
use crate::endpoint::HttpVerb;
use crate::{Error, ErrorContext, Result};

/// Correlation header attached to every request.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// reqwest-backed transport.
pub struct HttpTransport {
    client: reqwest::Client,
    config: TransportConfig,
    hooks: HookChain,
}

impl HttpTransport {
    pub fn new(config: TransportConfig, hooks: HookChain) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers(&config)?)
            .pool_max_idle_per_host(32)
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if let Some(ref agent) = config.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        if let Some(ref proxy_url) = config.proxy {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("invalid proxy URL '{}'", proxy_url),
                    ErrorContext::new()
                        .with_field_path("proxy")
                        .with_details(e.to_string())
                        .with_source("http_transport"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            config,
            hooks,
        })
    }

    pub fn hooks(&self) -> &HookChain {
        &self.hooks
    }

    fn url_for(&self, request: &PreparedRequest) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            request.path_and_query()
        )
    }

    async fn exchange(&self, request: &PreparedRequest, request_id: &str) -> Result<ApiResponse> {
        let mut req = self
            .client
            .request(method_of(request.method), self.url_for(request))
            .header(REQUEST_ID_HEADER, request_id);

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        req = match request.body {
            Some(RequestBody::Json(ref text)) => req.body(text.clone()),
            Some(RequestBody::Form(ref fields)) => req.form(fields),
            None => req,
        };

        let resp = req
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;
        let response = ApiResponse {
            status: status.as_u16(),
            headers,
            body: ApiResponse::parse_body(&bytes),
        };

        let response = self.hooks.after_response(request, response).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(Error::Transport(TransportError::Status {
                status: response.status,
                reason: status.canonical_reason().unwrap_or("").to_string(),
                body: response.body,
            }))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<ApiResponse> {
        let mut request = request.clone();
        self.hooks.before_send(&mut request).await?;

        let request_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();
        let outcome = match self.exchange(&request, &request_id).await {
            Ok(response) => Ok(response),
            Err(err) => Err(self.hooks.on_error(&request, err).await),
        };
        let duration_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(ref response) => tracing::info!(
                http_status = response.status,
                operation = %request.operation,
                method = %request.method,
                path = %request.path,
                request_id = %request_id,
                duration_ms,
                "paystack request completed"
            ),
            Err(ref err) => tracing::info!(
                http_status = ?err.status_code(),
                operation = %request.operation,
                method = %request.method,
                path = %request.path,
                request_id = %request_id,
                duration_ms,
                error = %err,
                "paystack request failed"
            ),
        }
        outcome
    }

    fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn extend(&self, options: &TransportOptions) -> Result<Arc<dyn Transport>> {
        let config = self.config.extend(options)?;
        let hooks = self.hooks.extended(&options.hooks);
        Ok(Arc::new(HttpTransport::new(config, hooks)?))
    }
}

fn method_of(verb: HttpVerb) -> Method {
    match verb {
        HttpVerb::Get => Method::GET,
        HttpVerb::Head => Method::HEAD,
        HttpVerb::Delete => Method::DELETE,
        HttpVerb::Post => Method::POST,
        HttpVerb::Put => Method::PUT,
        HttpVerb::Patch => Method::PATCH,
    }
}

fn default_headers(config: &TransportConfig) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in &config.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid header name '{}'", name),
                ErrorContext::new()
                    .with_field_path(format!("headers.{}", name))
                    .with_details(e.to_string())
                    .with_source("http_transport"),
            )
        })?;
        let mut header_value = HeaderValue::from_str(value).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid value for header '{}'", name),
                ErrorContext::new()
                    .with_field_path(format!("headers.{}", name))
                    .with_details(e.to_string())
                    .with_source("http_transport"),
            )
        })?;
        if header_name == reqwest::header::AUTHORIZATION {
            header_value.set_sensitive(true);
        }
        map.insert(header_name, header_value);
    }
    Ok(map)
}
