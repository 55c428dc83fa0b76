//! Request shape: paths, query strings, bodies and headers on the wire.

use crate::integration::mock_server::{MockServerFixture, TEST_SECRET_KEY};
use chrono::{TimeZone, Utc};
use mockito::Matcher;
use paystack::{CallArgs, Error};
use serde_json::json;

const OK_BODY: &str = r#"{"status":true,"message":"ok","data":{}}"#;

#[tokio::test]
async fn get_transaction_resolves_path_and_sends_fixed_headers() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock("GET", "/transaction/T123")
        .await
        .match_header("authorization", format!("Bearer {}", TEST_SECRET_KEY).as_str())
        .match_header("accept", "application/json")
        .match_header("cache-control", "no-cache")
        .match_header("x-request-id", Matcher::Regex("^[0-9a-f-]{36}$".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":true,"message":"Transaction retrieved","data":{"id":123}}"#)
        .create_async()
        .await;

    let client = fixture.client();
    let resp = client
        .get_transaction(CallArgs::new().with("id", "T123"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.message(), Some("Transaction retrieved"));
    assert_eq!(resp.data().unwrap()["id"], 123);
}

#[tokio::test]
async fn list_transaction_query_carries_defaults_and_caller_values() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock("GET", "/transaction")
        .await
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("perPage".into(), "50".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("customer".into(), "0".into()),
            Matcher::UrlEncoded("amount".into(), "0".into()),
            Matcher::UrlEncoded("status".into(), "success".into()),
            Matcher::UrlEncoded("from".into(), "2024-01-01T00:00:00.000".into()),
        ]))
        .with_status(200)
        .with_body(OK_BODY)
        .create_async()
        .await;

    let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let client = fixture.client();
    client
        .list_transaction(CallArgs::new().with("status", "success").with("from", from))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn initialize_transaction_posts_a_json_body_of_strings() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock("POST", "/transaction/initialize")
        .await
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "amount": "500000",
            "email": "customer@example.com",
            "invoice_limit": "0",
            "metadata": "{\"cart_id\":398}"
        })))
        .with_status(200)
        .with_body(OK_BODY)
        .create_async()
        .await;

    let client = fixture.client();
    client
        .initialize_transaction(
            CallArgs::new()
                .with("email", "customer@example.com")
                .with("amount", 500000i64)
                .with("metadata", "{\"cart_id\":398}"),
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn form_operations_send_url_encoded_bodies() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock("PUT", "/integration/payment_session_timeout")
        .await
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::UrlEncoded("timeout".into(), "30".into()))
        .with_status(200)
        .with_body(OK_BODY)
        .create_async()
        .await;

    let client = fixture.client();
    client
        .update_payment_session_timeout(CallArgs::new().with("timeout", 30i64))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn no_argument_operation_accepts_the_empty_call() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json_response("GET", "/integration/payment_session_timeout", 200, OK_BODY)
        .await;

    let client = fixture.client();
    let resp = client
        .call("getPaymentSessionTimeout", CallArgs::new())
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(resp.is_success());
}

#[tokio::test]
async fn preflight_failures_never_reach_the_server() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock("POST", Matcher::Any)
        .await
        .expect(0)
        .create_async()
        .await;
    let client = fixture.client();

    let err = client
        .initialize_transaction(CallArgs::new().with("email", "a@b.co"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    assert!(err.to_string().contains("\"amount\" is required"));

    let err = client
        .initialize_transaction(CallArgs::new().with("email", "a@b.co").with("amount", "5000"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("\"amount\" is not of type number"));

    let err = client.charge_card(CallArgs::new()).await.unwrap_err();
    assert!(matches!(err, Error::Argument { .. }));

    let err = client
        .call_json("initializeTransaction", json!(["a@b.co", 5000]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Argument { .. }));

    mock.assert_async().await;
}

#[tokio::test]
async fn call_json_maps_loose_arguments() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock("GET", "/transaction/verify/ref-42")
        .await
        .with_status(200)
        .with_body(OK_BODY)
        .create_async()
        .await;

    let client = fixture.client();
    client
        .call_json("verifyTransaction", json!({"reference": "ref-42"}))
        .await
        .unwrap();

    mock.assert_async().await;
}
