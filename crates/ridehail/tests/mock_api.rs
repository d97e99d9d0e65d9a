//! Mock API tests for the ridehail library.
//!
//! These tests use wiremock to simulate the ride-hailing service and a
//! ManualClock to drive token expiry without sleeping.

use chrono::{DateTime, TimeDelta, Utc};
use ridehail::api::{
    BookingRequest, CancelReason, Geolocation, PassengerDetails, QuoteSearch, WebhookRegistration,
};
use ridehail::error::DecodeTarget;
use ridehail::{
    AccessToken, ApiClient, ApiError, ApiRequest, ApiUrl, BookingId, CallResult, Client,
    Credentials, Error, ManualClock, QuoteId, QuoteListId, RefreshToken, Session, SharedSession,
    TokenManager,
};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create an API URL from a mock server.
fn mock_api_url(server: &MockServer) -> ApiUrl {
    ApiUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

fn t(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

fn manager(server: &MockServer, clock: &ManualClock) -> TokenManager<ManualClock> {
    TokenManager::with_clock(ApiClient::new(mock_api_url(server)), clock.clone())
}

async fn mount_token(server: &MockServer, access: &str, expires_in: u32, refresh: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/auth/token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "access_token": access,
            "expires_in": expires_in,
            "refresh_token": refresh
        })))
        .mount(server)
        .await;
}

fn credentials() -> Credentials {
    Credentials::new("ops@example.com", "secret123")
}

// ============================================================================
// TokenManager
// ============================================================================

#[tokio::test]
async fn test_acquire_success_sets_expiry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/token"))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "username": "ops@example.com",
            "password": "secret123"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "access_token": "a1",
            "expires_in": 3600,
            "refresh_token": "r1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let clock = ManualClock::new(t(1_700_000_000));
    let session = manager(&server, &clock)
        .acquire(&credentials())
        .await
        .unwrap();

    assert_eq!(session.access_token().as_str(), "a1");
    assert_eq!(session.refresh_token().as_str(), "r1");
    assert_eq!(session.expires_in(), 3600);
    assert_eq!(session.expires_at(), t(1_700_000_000) + TimeDelta::seconds(3600));

    // The token endpoint is called without a bearer header.
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_acquire_rejected_is_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": "unauthorized",
            "message": "invalid username or password",
            "details": [{"message": "password", "detail": "does not match"}]
        })))
        .mount(&server)
        .await;

    let clock = ManualClock::new(t(0));
    let err = manager(&server, &clock)
        .acquire(&credentials())
        .await
        .unwrap_err();

    match err {
        Error::Auth(api) => {
            assert_eq!(api.code, "unauthorized");
            assert_eq!(api.message, "invalid username or password");
            assert_eq!(api.details.len(), 1);
            assert_eq!(api.details[0].detail, "does not match");
        }
        other => panic!("expected auth error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_acquire_malformed_success_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/token"))
        .respond_with(ResponseTemplate::new(201).set_body_string("{\"access_token\": "))
        .mount(&server)
        .await;

    let clock = ManualClock::new(t(0));
    let err = manager(&server, &clock)
        .acquire(&credentials())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode(ref e) if e.target == DecodeTarget::Success));
}

#[tokio::test]
async fn test_acquire_empty_token_is_decode_error() {
    let server = MockServer::start().await;
    mount_token(&server, "", 3600, "r1").await;

    let clock = ManualClock::new(t(0));
    let err = manager(&server, &clock)
        .acquire(&credentials())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode(ref e) if e.target == DecodeTarget::Success));
}

#[tokio::test]
async fn test_expiry_then_refresh_scenario() {
    let server = MockServer::start().await;
    mount_token(&server, "a1", 10, "r1").await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/refresh"))
        .and(body_json(json!({"refresh_token": "r1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "access_token": "a2",
            "expires_in": 20
        })))
        .expect(1)
        .mount(&server)
        .await;

    let clock = ManualClock::new(t(0));
    let tokens = manager(&server, &clock);

    let mut session = tokens.acquire(&credentials()).await.unwrap();
    assert_eq!(session.expires_at(), t(10));

    clock.set(t(11));
    tokens.ensure_fresh(&mut session).await.unwrap();

    assert_eq!(session.access_token().as_str(), "a2");
    assert_eq!(session.refresh_token().as_str(), "r1");
    assert_eq!(session.expires_in(), 20);
    assert_eq!(session.expires_at(), t(31));

    let requests = server.received_requests().await.unwrap();
    let refresh = requests
        .iter()
        .find(|r| r.url.path() == "/v1/auth/refresh")
        .unwrap();
    assert!(refresh.headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_ensure_fresh_is_noop_before_expiry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/refresh"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "access_token": "never",
            "expires_in": 20
        })))
        .expect(0)
        .mount(&server)
        .await;

    let clock = ManualClock::new(t(0));
    let tokens = manager(&server, &clock);
    let mut session = Session::new(AccessToken::new("a1"), RefreshToken::new("r1"), 10, t(0));
    let before = session.clone();

    for now in [t(0), t(5), t(10) - TimeDelta::milliseconds(1)] {
        clock.set(now);
        tokens.ensure_fresh(&mut session).await.unwrap();
    }

    assert_eq!(session, before);
}

#[tokio::test]
async fn test_ensure_fresh_refreshes_at_expiry_instant() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/refresh"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "access_token": "a2",
            "expires_in": 10
        })))
        .expect(1)
        .mount(&server)
        .await;

    let clock = ManualClock::new(t(10));
    let tokens = manager(&server, &clock);
    let mut session = Session::new(AccessToken::new("a1"), RefreshToken::new("r1"), 10, t(0));

    tokens.ensure_fresh(&mut session).await.unwrap();
    assert_eq!(session.access_token().as_str(), "a2");

    // Fresh again: a second check must not refresh.
    tokens.ensure_fresh(&mut session).await.unwrap();
}

#[tokio::test]
async fn test_refresh_rejected_leaves_session_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/refresh"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "invalid_grant",
            "message": "refresh token expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let clock = ManualClock::new(t(100));
    let tokens = manager(&server, &clock);
    let mut session = Session::new(AccessToken::new("a1"), RefreshToken::new("r1"), 10, t(0));
    let before = session.clone();

    let err = tokens.ensure_fresh(&mut session).await.unwrap_err();

    match err {
        Error::Refresh(api) => assert_eq!(api.message, "refresh token expired"),
        other => panic!("expected refresh error, got {:?}", other),
    }
    assert_eq!(session, before);
}

// ============================================================================
// ApiClient
// ============================================================================

#[tokio::test]
async fn test_send_classifies_by_expected_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/created"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    for status in [400u16, 401, 500] {
        Mock::given(method("POST"))
            .and(path(format!("/status/{}", status)))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "code": format!("e{}", status),
                "message": "rejected"
            })))
            .mount(&server)
            .await;
    }

    let client = ApiClient::new(mock_api_url(&server));

    let ok: CallResult<Value> = client
        .send(ApiRequest::post(client.url("created"), reqwest::StatusCode::CREATED))
        .await
        .unwrap();
    assert_eq!(ok, CallResult::Success(json!({"ok": true})));

    for status in [400u16, 401, 500] {
        let request = ApiRequest::post(
            client.url(&format!("status/{}", status)),
            reqwest::StatusCode::CREATED,
        );
        let result: CallResult<Value> = client.send(request).await.unwrap();
        let failure = result.failure().expect("non-201 must be a failure");
        assert_eq!(failure.code, format!("e{}", status));
        assert_eq!(failure.message, "rejected");
    }
}

#[tokio::test]
async fn test_send_unexpected_success_status_is_failure() {
    let server = MockServer::start().await;

    // 200 where 201 is expected is still the error branch.
    Mock::given(method("POST"))
        .and(path("/v2/quotes/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "wrong_status",
            "message": "ok but not created"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(mock_api_url(&server));
    let result: CallResult<Value> = client
        .send(ApiRequest::post(client.url("v2/quotes/"), reqwest::StatusCode::CREATED))
        .await
        .unwrap();

    assert_eq!(result.failure().unwrap().code, "wrong_status");
}

#[tokio::test]
async fn test_send_not_found_scenario() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/bookings/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(r#"{"code":"not_found","message":"no such booking"}"#),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(mock_api_url(&server));
    let result: CallResult<Value> = client
        .send(ApiRequest::get(
            client.url("v1/bookings/missing"),
            reqwest::StatusCode::OK,
        ))
        .await
        .unwrap();

    assert_eq!(
        result,
        CallResult::Failure(ApiError {
            code: "not_found".to_string(),
            message: "no such booking".to_string(),
            details: vec![],
        })
    );
}

#[tokio::test]
async fn test_send_null_details_is_still_a_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/bookings/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            r#"{"code":"not_found","message":"no such booking","details":null}"#,
        ))
        .mount(&server)
        .await;

    let client = ApiClient::new(mock_api_url(&server));
    let result: CallResult<Value> = client
        .send(ApiRequest::get(
            client.url("v1/bookings/missing"),
            reqwest::StatusCode::OK,
        ))
        .await
        .unwrap();

    assert_eq!(
        result,
        CallResult::Failure(ApiError {
            code: "not_found".to_string(),
            message: "no such booking".to_string(),
            details: vec![],
        })
    );
}

#[tokio::test]
async fn test_booking_with_null_fields_decodes() {
    let server = MockServer::start().await;
    mount_token(&server, "a1", 3600, "r1").await;

    Mock::given(method("GET"))
        .and(path("/v1/bookings/bk-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "bk-1",
            "status": "CONFIRMED",
            "flight_number": null,
            "vehicle": null,
            "meta": null
        })))
        .mount(&server)
        .await;

    let clock = ManualClock::new(t(0));
    let client = login(&server, &clock).await;

    let booking = client
        .booking(&BookingId::new("bk-1").unwrap())
        .await
        .unwrap();

    assert_eq!(booking.status, "CONFIRMED");
    assert_eq!(booking.flight_number, "");
    assert!(booking.meta.is_empty());
}

#[tokio::test]
async fn test_send_malformed_bodies_are_decode_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bad-success"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/bad-error"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = ApiClient::new(mock_api_url(&server));

    let err = client
        .send::<Value>(ApiRequest::get(client.url("bad-success"), reqwest::StatusCode::OK))
        .await
        .unwrap_err();
    match err {
        Error::Decode(e) => {
            assert_eq!(e.status, 200);
            assert_eq!(e.target, DecodeTarget::Success);
        }
        other => panic!("expected decode error, got {:?}", other),
    }

    let err = client
        .send::<Value>(ApiRequest::get(client.url("bad-error"), reqwest::StatusCode::OK))
        .await
        .unwrap_err();
    match err {
        Error::Decode(e) => {
            assert_eq!(e.status, 502);
            assert_eq!(e.target, DecodeTarget::ApiError);
        }
        other => panic!("expected decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_send_preserves_nested_request_body() {
    let server = MockServer::start().await;

    let fixture = json!({
        "quote_id": "q-1",
        "passengers": {
            "additional_passengers": 2,
            "passenger_details": [
                {"first_name": "Ada", "last_name": "Lovelace", "phone_number": "+15005550006"},
                {"first_name": "Alan", "last_name": "Turing", "phone_number": "+15005550007"}
            ],
            "luggage": {"total": 3}
        },
        "meta": {"tags": ["vip", "airport"], "nested": {"deep": [1, 2, {"x": null}]}}
    });

    Mock::given(method("POST"))
        .and(path("/echo"))
        .and(body_json(fixture.clone()))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(mock_api_url(&server));
    let request = ApiRequest::post(client.url("echo"), reqwest::StatusCode::CREATED)
        .json(&fixture)
        .unwrap();
    let result: CallResult<Value> = client.send(request).await.unwrap();

    assert!(result.is_success());
}

#[tokio::test]
async fn test_send_no_content_skips_decoding() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/bookings/bk-1/cancel/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/webhooks/"))
        .respond_with(ResponseTemplate::new(201).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let client = ApiClient::new(mock_api_url(&server));

    let cancelled = client
        .send_no_content(ApiRequest::post(
            client.url("v1/bookings/bk-1/cancel/"),
            reqwest::StatusCode::NO_CONTENT,
        ))
        .await
        .unwrap();
    assert_eq!(cancelled, CallResult::Success(()));

    let registered = client
        .send_no_content(ApiRequest::post(
            client.url("v1/webhooks/"),
            reqwest::StatusCode::CREATED,
        ))
        .await
        .unwrap();
    assert_eq!(registered, CallResult::Success(()));
}

#[tokio::test]
async fn test_transport_failure() {
    // Nothing listens on port 1.
    let client = ApiClient::new(ApiUrl::new("http://127.0.0.1:1").unwrap());
    let err = client
        .send::<Value>(ApiRequest::get(client.url("v1/webhooks/"), reqwest::StatusCode::OK))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
}

// ============================================================================
// Client
// ============================================================================

async fn login(server: &MockServer, clock: &ManualClock) -> Client<ManualClock> {
    Client::login_with(manager(server, clock), &credentials())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_resource_call_attaches_bearer() {
    let server = MockServer::start().await;
    mount_token(&server, "a1", 3600, "r1").await;

    Mock::given(method("GET"))
        .and(path("/v1/webhooks/"))
        .and(header("authorization", "Bearer a1"))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"url": "https://hooks.example.com"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let clock = ManualClock::new(t(0));
    let client = login(&server, &clock).await;

    let subscription = client.webhook_subscription().await.unwrap();
    assert_eq!(subscription.url, "https://hooks.example.com");
}

#[tokio::test]
async fn test_expired_session_refreshes_before_resource_call() {
    let server = MockServer::start().await;
    mount_token(&server, "a1", 10, "r1").await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/refresh"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "access_token": "a2",
            "expires_in": 20
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/bookings/bk-1"))
        .and(header("authorization", "Bearer a2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "bk-1",
            "status": "CONFIRMED"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let clock = ManualClock::new(t(0));
    let client = login(&server, &clock).await;

    clock.set(t(11));
    let booking = client
        .booking(&BookingId::new("bk-1").unwrap())
        .await
        .unwrap();

    assert_eq!(booking.status, "CONFIRMED");
    let session = client.session_snapshot().await;
    assert_eq!(session.refresh_token().as_str(), "r1");
    assert_eq!(session.expires_at(), t(31));
}

#[tokio::test]
async fn test_failed_refresh_blocks_resource_call() {
    let server = MockServer::start().await;
    mount_token(&server, "a1", 10, "r1").await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": "unauthorized",
            "message": "refresh token revoked"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/webhooks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"url": "x"})))
        .expect(0)
        .mount(&server)
        .await;

    let clock = ManualClock::new(t(0));
    let client = login(&server, &clock).await;

    clock.advance(TimeDelta::seconds(60));
    let err = client.webhook_subscription().await.unwrap_err();

    assert!(matches!(err, Error::Refresh(_)));
}

#[tokio::test]
async fn test_concurrent_callers_refresh_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"access_token": "a2", "expires_in": 60}))
                .set_delay(std::time::Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let clock = ManualClock::new(t(100));
    let tokens = manager(&server, &clock);
    let shared = SharedSession::new(Session::new(
        AccessToken::new("a1"),
        RefreshToken::new("r1"),
        10,
        t(0),
    ));

    let (first, second) = tokio::join!(
        shared.fresh_access_token(&tokens),
        shared.fresh_access_token(&tokens)
    );

    assert_eq!(first.unwrap().as_str(), "a2");
    assert_eq!(second.unwrap().as_str(), "a2");
}

#[tokio::test]
async fn test_booking_lifecycle() {
    let server = MockServer::start().await;
    mount_token(&server, "a1", 3600, "r1").await;

    Mock::given(method("POST"))
        .and(path("/v2/quotes/"))
        .and(body_json(json!({
            "origin": {"latitude": "50.037933", "longitude": "8.562152", "display_address": "Frankfurt Airport"},
            "destination": {"latitude": "51.037933", "longitude": "8.910231", "display_address": "Some place nearby"},
            "local_time_of_pickup": ""
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "ql-1",
            "status": "PROGRESSING",
            "quotes": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/quotes/ql-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "ql-1",
            "status": "COMPLETED",
            "quotes": [{"id": "q-1", "price": {"currency_code": "EUR", "low": 3900, "high": 4200}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/bookings/"))
        .and(body_json(json!({
            "quote_id": "q-1",
            "passengers": {
                "passenger_details": [{
                    "first_name": "Ada",
                    "last_name": "Lovelace",
                    "phone_number": "+15005550006"
                }],
                "luggage": {"total": 1}
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "bk-1",
            "status": "REQUESTED"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/bookings/bk-1/cancel/"))
        .and(body_json(json!({"reason": "OTHER_USER_REASON"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/webhooks/"))
        .and(body_json(json!({"url": "https://hooks.example.com", "shared_secret": "s3cret"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let clock = ManualClock::new(t(0));
    let client = login(&server, &clock).await;

    client
        .register_webhook(&WebhookRegistration::new("https://hooks.example.com", "s3cret"))
        .await
        .unwrap();

    let search = QuoteSearch::asap(
        Geolocation::new("50.037933", "8.562152", "Frankfurt Airport"),
        Geolocation::new("51.037933", "8.910231", "Some place nearby"),
    );
    let searched = client.search_quotes(&search).await.unwrap();
    let list = client
        .quote_list(&QuoteListId::new(searched.id).unwrap())
        .await
        .unwrap();
    assert_eq!(list.quotes.len(), 1);

    let request = BookingRequest::new(
        QuoteId::new(list.quotes[0].id.clone()).unwrap(),
        PassengerDetails::new("Ada", "Lovelace", "+15005550006"),
        1,
    );
    let booking = client.create_booking(&request).await.unwrap();

    client
        .cancel_booking(&booking.booking_id().unwrap(), CancelReason::OtherUserReason)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_resource_failure_is_api_error() {
    let server = MockServer::start().await;
    mount_token(&server, "a1", 3600, "r1").await;

    Mock::given(method("POST"))
        .and(path("/v1/bookings/bk-9/cancel/"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "already_cancelled",
            "message": "booking already cancelled"
        })))
        .mount(&server)
        .await;

    let clock = ManualClock::new(t(0));
    let client = login(&server, &clock).await;

    let err = client
        .cancel_booking(&BookingId::new("bk-9").unwrap(), CancelReason::EtaTooLong)
        .await
        .unwrap_err();

    assert_eq!(err.api_error().unwrap().code, "already_cancelled");
    assert!(matches!(err, Error::Api(_)));
}
