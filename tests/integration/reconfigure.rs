//! Reconfiguration, custom hooks and batch calls against a live mock server.

use crate::integration::mock_server::MockServerFixture;
use async_trait::async_trait;
use mockito::Matcher;
use paystack::{BatchCall, CallArgs, PreparedRequest, ResponseHook, TransportOptions};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const OK_BODY: &str = r#"{"status":true,"message":"ok","data":[]}"#;

#[derive(Default)]
struct CountingHook {
    sent: AtomicUsize,
}

#[async_trait]
impl ResponseHook for CountingHook {
    fn name(&self) -> &str {
        "counting"
    }

    async fn before_send(&self, request: &mut PreparedRequest) -> paystack::Result<()> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        request
            .headers
            .push(("X-Hooked".to_string(), request.operation.clone()));
        Ok(())
    }
}

#[tokio::test]
async fn reconfigure_applies_to_later_calls_only() {
    let fixture = MockServerFixture::new().await;
    let before = fixture
        .mock("GET", "/balance")
        .await
        .match_header("authorization", "Bearer sk_test_fixture")
        .match_header("x-team", Matcher::Missing)
        .with_status(200)
        .with_body(OK_BODY)
        .expect(1)
        .create_async()
        .await;

    let client = fixture.client();
    let snapshot = client.config();
    client.check_balance(CallArgs::new()).await.unwrap();
    before.assert_async().await;

    let after = fixture
        .mock("GET", "/balance")
        .await
        .match_header("authorization", "Bearer sk_test_rotated")
        .match_header("x-team", "payments")
        .match_header("cache-control", "no-cache")
        .with_status(200)
        .with_body(OK_BODY)
        .expect(1)
        .create_async()
        .await;

    client
        .reconfigure(
            TransportOptions::new()
                .secret_key("sk_test_rotated")
                .header("X-Team", "payments"),
        )
        .unwrap();
    client.check_balance(CallArgs::new()).await.unwrap();
    after.assert_async().await;

    assert_eq!(snapshot.header("authorization"), Some("Bearer sk_test_fixture"));
    assert!(snapshot.header("x-team").is_none());
}

#[tokio::test]
async fn hooks_added_by_reconfigure_run_on_every_call() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock("GET", "/balance")
        .await
        .match_header("x-hooked", "checkBalance")
        .with_status(200)
        .with_body(OK_BODY)
        .expect(2)
        .create_async()
        .await;

    let hook = Arc::new(CountingHook::default());
    let client = fixture.client();
    client
        .reconfigure(TransportOptions::new().hook(hook.clone()))
        .unwrap();

    client.check_balance(CallArgs::new()).await.unwrap();
    client.check_balance(CallArgs::new()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(hook.sent.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn batch_results_follow_input_order() {
    let fixture = MockServerFixture::new().await;
    let _a = fixture
        .mock_json_response("GET", "/transaction/A", 200, r#"{"status":true,"data":{"id":"A"}}"#)
        .await;
    let _b = fixture
        .mock_json_response("GET", "/transaction/B", 200, r#"{"status":true,"data":{"id":"B"}}"#)
        .await;
    let _c = fixture
        .mock_json_response("GET", "/transaction/C", 400, r#"{"status":false,"message":"nope"}"#)
        .await;

    let client = fixture.client();
    let calls = ["A", "C", "B"]
        .into_iter()
        .map(|id| BatchCall::new("getTransaction", CallArgs::new().with("id", id)))
        .collect();
    let results = client.call_batch(calls, Some(2)).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().data().unwrap()["id"], "A");
    assert_eq!(
        results[1].as_ref().unwrap_err().to_string(),
        "PaystackError: nope (400)"
    );
    assert_eq!(results[2].as_ref().unwrap().data().unwrap()["id"], "B");
}
