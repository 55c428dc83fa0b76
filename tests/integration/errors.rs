//! Upstream failures and how the default hooks normalize them.

use crate::integration::mock_server::MockServerFixture;
use async_trait::async_trait;
use paystack::{ApiResponse, CallArgs, Error, PreparedRequest, ResponseHook, TransportError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn upstream_error_is_rewritten_with_its_message_and_status() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json_response(
            "POST",
            "/transaction/initialize",
            400,
            r#"{"status":false,"message":"Invalid Email Address Passed"}"#,
        )
        .await;

    let client = fixture.client();
    let err = client
        .initialize_transaction(
            CallArgs::new()
                .with("email", "not-an-email")
                .with("amount", 100i64),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "PaystackError: Invalid Email Address Passed (400)"
    );
    match err {
        Error::Remote { status, body, .. } => {
            assert_eq!(status, 400);
            assert_eq!(body["status"], false);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_response_carries_the_auth_notice() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json_response(
            "GET",
            "/transaction/T1",
            401,
            r#"{"status":false,"message":"Invalid key"}"#,
        )
        .await;

    let client = fixture.client();
    let err = client
        .get_transaction(CallArgs::new().with("id", "T1"))
        .await
        .unwrap_err();

    match err {
        Error::UpstreamStatus {
            status,
            ref notice,
            ref message,
        } => {
            assert_eq!(status, 401);
            assert_eq!(
                notice,
                "Bearer Authorization header may not have been set: Unauthorized (401)"
            );
            assert_eq!(message.as_deref(), Some("Invalid key"));
        }
        ref other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
async fn not_found_without_notices_is_an_ordinary_upstream_error() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json_response(
            "GET",
            "/transaction/missing",
            404,
            r#"{"status":false,"message":"Transaction not found"}"#,
        )
        .await;

    let client = fixture.builder().status_notices(false).build().unwrap();
    let err = client
        .get_transaction(CallArgs::new().with("id", "missing"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "PaystackError: Transaction not found (404)");
}

#[tokio::test]
async fn non_json_failure_stays_a_transport_status_error() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock("GET", "/balance")
        .await
        .with_status(502)
        .with_header("content-type", "text/html")
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let client = fixture.client();
    let err = client.check_balance(CallArgs::new()).await.unwrap_err();

    match err {
        Error::Transport(TransportError::Status { status, body, .. }) => {
            assert_eq!(status, 502);
            assert_eq!(body, serde_json::json!("<html>Bad Gateway</html>"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Counts every response it is shown.
struct StatusCounter(Arc<AtomicUsize>);

#[async_trait]
impl ResponseHook for StatusCounter {
    fn name(&self) -> &str {
        "status_counter"
    }

    async fn after_response(
        &self,
        _request: &PreparedRequest,
        response: ApiResponse,
    ) -> paystack::Result<ApiResponse> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(response)
    }
}

#[tokio::test]
async fn user_hooks_see_responses_that_end_in_a_notice() {
    let fixture = MockServerFixture::new().await;
    let _missing = fixture
        .mock_json_response(
            "GET",
            "/transaction/gone",
            404,
            r#"{"status":false,"message":"nf"}"#,
        )
        .await;
    let _bad = fixture
        .mock_json_response(
            "GET",
            "/transaction/bad",
            400,
            r#"{"status":false,"message":"bad id"}"#,
        )
        .await;

    let seen = Arc::new(AtomicUsize::new(0));
    let client = fixture
        .builder()
        .hook(Arc::new(StatusCounter(seen.clone())))
        .build()
        .unwrap();

    let err = client
        .get_transaction(CallArgs::new().with("id", "gone"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UpstreamStatus { status: 404, .. }));
    assert_eq!(seen.load(Ordering::SeqCst), 1);

    let err = client
        .get_transaction(CallArgs::new().with("id", "bad"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(400));
    assert_eq!(seen.load(Ordering::SeqCst), 2);
}
