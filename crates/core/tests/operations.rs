//! Integration tests for the authenticated operations

mod support;

use std::sync::Arc;

use serde_json::json;
use support::{client_with, ScriptedTransport, BASE_URL};
use venmo_core::{HttpMethod, RawResponse, TransportError};
use venmo_domain::{ApiErrorKind, Audience, FriendsPage, PaymentRequest};

fn ok(body: serde_json::Value) -> RawResponse {
    RawResponse::json(200, &body)
}

#[tokio::test]
async fn request_payment_rejects_positive_amount_locally() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client_with(&transport);

    let err = client
        .request_payment(&PaymentRequest::new(50.0, "bob", "dinner"), "tok")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::DomainValidation { code: 506 });
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn request_payment_rejects_amount_below_floor_locally() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client_with(&transport);

    let err = client
        .request_payment(&PaymentRequest::new(-150.0, "bob", "dinner"), "tok")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::DomainValidation { code: 507 });
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn request_payment_sends_private_request() {
    let transport = Arc::new(ScriptedTransport::new().respond(ok(json!({"id": 1}))));
    let client = client_with(&transport);

    let response = client
        .request_payment(&PaymentRequest::new(-20.0, "bob", "dinner"), "tok")
        .await
        .unwrap();
    assert_eq!(response.data, json!({"id": 1}));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url.as_str(), format!("{BASE_URL}/payments"));
    assert_eq!(request.header_value("authorization"), Some("Bearer tok"));
    assert_eq!(request.header_value("content-type"), Some("application/json"));
    assert_eq!(
        request.body,
        Some(json!({
            "amount": -20.0,
            "audience": "private",
            "note": "dinner",
            "username": "bob",
        }))
    );
}

#[tokio::test]
async fn request_payment_maps_privacy_flag_to_audience() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .respond(ok(json!({})))
            .respond(ok(json!({})))
            .respond(ok(json!({}))),
    );
    let client = client_with(&transport);

    let public = PaymentRequest::new(-5.0, "bob", "coffee").private(false);
    let private = PaymentRequest::new(-5.0, "bob", "coffee").private(true);
    let friends = PaymentRequest::new(-5.0, "bob", "coffee").with_audience(Audience::Friends);
    for request in [&public, &private, &friends] {
        client.request_payment(request, "tok").await.unwrap();
    }

    let audiences: Vec<_> = transport
        .requests()
        .iter()
        .map(|r| r.body.as_ref().and_then(|b| b["audience"].as_str()).map(str::to_owned))
        .collect();
    assert_eq!(
        audiences,
        vec![Some("public".to_owned()), Some("private".to_owned()), Some("friends".to_owned())]
    );
}

#[tokio::test]
async fn request_payment_requires_every_field() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client_with(&transport);

    let err = client
        .request_payment(&PaymentRequest::new(-20.0, "", ""), "")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::Validation);
    assert_eq!(err.message(), "target_user_name, note and access_token are required");
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn missing_arguments_never_reach_transport() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client_with(&transport);

    let results = [
        client.fetch_user("", "tok").await,
        client.fetch_user("bob", "").await,
        client.fetch_transaction("", "tok").await,
        client.fetch_transaction("123", " ").await,
        client.fetch_friends("", "tok").await,
        client.fetch_friends("42", "").await,
        client.fetch_friends_page("", "tok", FriendsPage::default()).await,
    ];
    for result in results {
        assert_eq!(result.unwrap_err().kind(), ApiErrorKind::Validation);
    }
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn fetch_user_targets_user_path() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .respond(ok(json!({"data": {"username": "bob"}})).with_header("X-Request-Id", "r-9")),
    );
    let client = client_with(&transport);

    let response = client.fetch_user("bob", "tok").await.unwrap();

    assert_eq!(response.data["data"]["username"], "bob");
    assert_eq!(response.header("x-request-id"), Some("r-9"));

    let request = &transport.requests()[0];
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.url.as_str(), format!("{BASE_URL}/users/bob"));
    assert_eq!(request.header_value("authorization"), Some("Bearer tok"));
    assert!(request.body.is_none());
}

#[tokio::test]
async fn path_segments_are_percent_encoded() {
    let transport = Arc::new(ScriptedTransport::new().respond(ok(json!({}))));
    let client = client_with(&transport);

    client.fetch_user("bob/../admin", "tok").await.unwrap();

    let request = &transport.requests()[0];
    assert_eq!(request.url.as_str(), format!("{BASE_URL}/users/bob%2F..%2Fadmin"));
}

#[tokio::test]
async fn fetch_transaction_targets_story_path() {
    let transport = Arc::new(ScriptedTransport::new().respond(ok(json!({"data": {"id": "123"}}))));
    let client = client_with(&transport);

    client.fetch_transaction("123", "tok").await.unwrap();

    assert_eq!(transport.requests()[0].url.as_str(), format!("{BASE_URL}/stories/123"));
}

#[tokio::test]
async fn fetch_friends_and_pages() {
    let transport = Arc::new(
        ScriptedTransport::new().respond(ok(json!({"data": []}))).respond(ok(json!({"data": []}))),
    );
    let client = client_with(&transport);

    client.fetch_friends("42", "tok").await.unwrap();
    client.fetch_friends_page("42", "tok", FriendsPage { limit: 50, offset: 100 }).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].url.as_str(), format!("{BASE_URL}/users/42/friends"));
    assert_eq!(
        requests[1].url.as_str(),
        format!("{BASE_URL}/users/42/friends?limit=50&offset=100")
    );
}

#[tokio::test]
async fn service_error_bodies_are_returned_as_data() {
    let transport = Arc::new(ScriptedTransport::new().respond(RawResponse::json(
        404,
        &json!({"error": {"message": "Resource not found.", "code": 283}}),
    )));
    let client = client_with(&transport);

    let response = client.fetch_user("nobody", "tok").await.unwrap();
    assert_eq!(response.data["error"]["code"], 283);
}

#[tokio::test]
async fn rate_limit_is_an_error_with_headers() {
    let transport = Arc::new(ScriptedTransport::new().respond(
        RawResponse::new(429)
            .with_reason("Too Many Requests")
            .with_header("Retry-After", "30")
            .with_body("{\"data\": \"ignored\"}"),
    ));
    let client = client_with(&transport);

    let err = client.fetch_friends("42", "tok").await.unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::RateLimited);
    assert_eq!(err.message(), "Too Many Requests");
    assert_eq!(err.headers().get("retry_after").map(String::as_str), Some("30"));
}

#[tokio::test]
async fn undecodable_body_is_malformed() {
    let transport = Arc::new(
        ScriptedTransport::new().respond(RawResponse::new(200).with_body("<html>oops</html>")),
    );
    let client = client_with(&transport);

    let err = client.fetch_transaction("1", "tok").await.unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::MalformedResponse);
    assert_eq!(err.message(), "Error occurred when fetching data");
}

#[tokio::test]
async fn transport_failure_carries_operation_context() {
    let transport = Arc::new(
        ScriptedTransport::new().fail(TransportError::Connect("connection refused".into())),
    );
    let client = client_with(&transport);

    let err = client
        .request_payment(&PaymentRequest::new(-20.0, "bob", "dinner"), "tok")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::Transport);
    assert!(err.message().contains("bob"));
    assert!(err.message().contains("connection refused"));
    assert!(err.is_retryable());
}
