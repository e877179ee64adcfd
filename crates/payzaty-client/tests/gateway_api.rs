//! HTTP-level tests for the Payzaty gateway client against a mock server.

use payzaty_client::{PayzatyConfig, PayzatyGateway};
use payzaty_core::{
    BillingAddress, CallbackUrls, Currency, GatewaySettings, InMemorySettingsStore, Order,
    PaymentError, PaymentGateway, Price, SettingsStore, ALL_STORES,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_order() -> Order {
    Order::new(
        42,
        BillingAddress {
            first_name: "Sara".into(),
            last_name: "Alghamdi".into(),
            email: "sara@example.com".into(),
            phone: "501234567".into(),
        },
        Price::new(244.0, Currency::SAR),
    )
}

async fn gateway_for(server: &MockServer) -> PayzatyGateway {
    let settings = Arc::new(InMemorySettingsStore::with_settings(GatewaySettings::new(
        true, "acc-123", "sk-456",
    )));
    PayzatyGateway::new(
        PayzatyConfig::default().with_base_url(server.uri()),
        settings,
        ALL_STORES,
    )
}

#[tokio::test]
async fn initiate_checkout_returns_redirect_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/checkout"))
        .and(header("X-AccountNo", "acc-123"))
        .and(header("X-SecretKey", "sk-456"))
        .and(body_partial_json(json!({
            "amount": 24400,
            "currency": "SAR",
            "reference": "42",
            "customer": { "phone": "+966501234567" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "checkout_url": "https://pay.payzaty.com/session/abc",
            "reference": "42"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server).await;
    let urls = CallbackUrls::new("https://shop.example.com");

    let session = gateway
        .create_checkout(&sample_order(), &urls)
        .await
        .unwrap();

    assert_eq!(session.checkout_url, "https://pay.payzaty.com/session/abc");
    assert_eq!(session.order_id, 42);
    assert_eq!(session.provider, "payzaty");
    assert_eq!(session.reference.as_deref(), Some("42"));
}

#[tokio::test]
async fn initiate_without_checkout_url_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/checkout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "accepted" })))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server).await;
    let urls = CallbackUrls::new("https://shop.example.com");

    let err = gateway
        .create_checkout(&sample_order(), &urls)
        .await
        .unwrap_err();

    assert!(matches!(err, PaymentError::CheckoutCreationFailed(_)));
}

#[tokio::test]
async fn initiate_maps_non_2xx_to_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/checkout"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid credentials"))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server).await;
    let urls = CallbackUrls::new("https://shop.example.com");

    let err = gateway
        .create_checkout(&sample_order(), &urls)
        .await
        .unwrap_err();

    match err {
        PaymentError::ProviderError { provider, message } => {
            assert_eq!(provider, "payzaty");
            assert!(message.contains("401"));
        }
        other => panic!("expected ProviderError, got {:?}", other),
    }
}

#[tokio::test]
async fn status_parses_stringly_typed_paid() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/checkout/cs_1"))
        .and(header("X-AccountNo", "acc-123"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "paid": "True", "reference": "42" })),
        )
        .mount(&server)
        .await;

    let gateway = gateway_for(&server).await;
    let status = gateway.checkout_status("cs_1").await.unwrap();

    assert_eq!(status.paid, Some(true));
    assert_eq!(status.reference.as_deref(), Some("42"));
}

#[tokio::test]
async fn status_without_paid_is_unresolved_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/checkout/cs_2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server).await;
    let status = gateway.checkout_status("cs_2").await.unwrap();

    assert_eq!(status.paid, None);
    assert_eq!(status.reference, None);
}

#[tokio::test]
async fn terminal_status_without_reference_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/checkout/cs_3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "paid": false })))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server).await;
    let err = gateway.checkout_status("cs_3").await.unwrap_err();

    assert!(matches!(err, PaymentError::MalformedResponse(_)));
}

#[tokio::test]
async fn malformed_body_is_a_typed_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/checkout/cs_4"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway oops</html>"))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server).await;
    let err = gateway.checkout_status("cs_4").await.unwrap_err();

    assert!(matches!(err, PaymentError::MalformedResponse(_)));
}

#[tokio::test]
async fn settings_changes_apply_between_calls() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/checkout/cs_5"))
        .and(header("X-AccountNo", "acc-123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "paid": "False", "reference": "7" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/checkout/cs_5"))
        .and(header("X-AccountNo", "acc-rotated"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "paid": "True", "reference": "7" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let settings = Arc::new(InMemorySettingsStore::with_settings(GatewaySettings::new(
        true, "acc-123", "sk-456",
    )));
    let gateway = PayzatyGateway::new(
        PayzatyConfig::default().with_base_url(server.uri()),
        settings.clone(),
        ALL_STORES,
    );

    let first = gateway.checkout_status("cs_5").await.unwrap();
    assert_eq!(first.paid, Some(false));

    // Rotate credentials in the store; the client must pick them up on
    // the very next call without being rebuilt.
    settings
        .save(
            ALL_STORES,
            GatewaySettings::new(true, "acc-rotated", "sk-456"),
        )
        .await
        .unwrap();

    let second = gateway.checkout_status("cs_5").await.unwrap();
    assert_eq!(second.paid, Some(true));
}
