//! Mock HTTP server setup for integration tests

use mockito::{Matcher, Mock, Server, ServerGuard};
use paystack::{PaystackClient, PaystackClientBuilder};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const TEST_SECRET_KEY: &str = "sk_test_fixture";

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: Arc<Mutex<ServerGuard>>,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        init_tracing();
        let server = Server::new_async().await;
        let base_url = server.url();
        Self {
            server: Arc::new(Mutex::new(server)),
            base_url,
        }
    }

    /// Builder pointed at the mock server through `base_url_override`
    pub fn builder(&self) -> PaystackClientBuilder {
        PaystackClientBuilder::new()
            .secret_key(TEST_SECRET_KEY)
            .environment("development")
            .base_url_override(&self.base_url)
    }

    pub fn client(&self) -> PaystackClient {
        self.builder().build().expect("client builds")
    }

    /// Create a mock for a successful JSON response
    pub async fn mock_json_response(&self, method: &str, path: &str, status: u16, body: &str) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock(method, path)
            .with_status(status as usize)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Start a mock definition; the caller adds matchers and creates it.
    pub async fn mock(&self, method: &str, path: impl Into<Matcher>) -> Mock {
        let mut server = self.server.lock().await;
        server.mock(method, path)
    }
}

/// Log to the test writer, filtered by `RUST_LOG`. Only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
