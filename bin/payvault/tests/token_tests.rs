mod common;

use common::*;
use http::StatusCode;
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn cached_token_is_reused_within_its_expiry_window() {
    let mock = MockServer::start().await;
    mount_auth_mock_with_expiry(&mock, Some(3600), 1).await;

    Mock::given(method("GET"))
        .and(path("/v1/bank-transfer/reserved-accounts/REF1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(reserved_account_body("REF1", "7000000001")),
        )
        .expect(2)
        .mount(&mock)
        .await;

    let state = test_state(&mock.uri());
    let user = seed_user(&state, "token@x.com", Some("REF1"));
    let token = bearer_for(&state, user.id);
    let server = create_test_server(state);

    for _ in 0..2 {
        server
            .get("/api/accounts/REF1")
            .authorization_bearer(&token)
            .await
            .assert_status_ok();
    }

    // a single authentication served both calls
    mock.verify().await;
}

#[tokio::test]
async fn expired_token_is_never_reused() {
    let mock = MockServer::start().await;
    // 60s reported lifetime is inside the safety skew, so every call must
    // re-authenticate
    mount_auth_mock_with_expiry(&mock, Some(60), 2).await;

    Mock::given(method("GET"))
        .and(path("/v1/bank-transfer/reserved-accounts/REF1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(reserved_account_body("REF1", "7000000001")),
        )
        .expect(2)
        .mount(&mock)
        .await;

    let state = test_state(&mock.uri());
    let user = seed_user(&state, "expired@x.com", Some("REF1"));
    let token = bearer_for(&state, user.id);
    let server = create_test_server(state);

    for _ in 0..2 {
        server
            .get("/api/accounts/REF1")
            .authorization_bearer(&token)
            .await
            .assert_status_ok();
    }

    mock.verify().await;
}

#[tokio::test]
async fn upstream_rejection_triggers_exactly_one_reauthentication() {
    let mock = MockServer::start().await;
    mount_auth_mock_with_expiry(&mock, Some(3600), 2).await;

    // first lookup is rejected with 401, then stops matching; the retry
    // falls through to the success mock below
    Mock::given(method("GET"))
        .and(path("/v1/bank-transfer/reserved-accounts/REF1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(processor_rejection("expired token")))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/bank-transfer/reserved-accounts/REF1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(reserved_account_body("REF1", "7000000001")),
        )
        .expect(1)
        .mount(&mock)
        .await;

    let state = test_state(&mock.uri());
    let user = seed_user(&state, "reauth@x.com", Some("REF1"));
    let token = bearer_for(&state, user.id);
    let server = create_test_server(state);

    let response = server
        .get("/api/accounts/REF1")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    mock.verify().await;
}

#[tokio::test]
async fn persistent_upstream_rejection_is_not_retried_in_a_loop() {
    let mock = MockServer::start().await;
    // initial authentication plus the single permitted re-authentication
    mount_auth_mock_with_expiry(&mock, Some(3600), 2).await;

    Mock::given(method("GET"))
        .and(path("/v1/bank-transfer/reserved-accounts/REF1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(processor_rejection("expired token")))
        .expect(2)
        .mount(&mock)
        .await;

    let state = test_state(&mock.uri());
    let user = seed_user(&state, "loop@x.com", Some("REF1"));
    let token = bearer_for(&state, user.id);
    let server = create_test_server(state);

    let response = server
        .get("/api/accounts/REF1")
        .authorization_bearer(&token)
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["code"], "upstream_auth_failed");

    mock.verify().await;
}

#[tokio::test]
async fn protected_routes_require_a_local_token() {
    let mock = MockServer::start().await;

    let state = test_state(&mock.uri());
    let server = create_test_server(state);

    let response = server.get("/api/accounts/REF1").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let requests = mock.received_requests().await.expect("requests recorded");
    assert!(requests.is_empty());
}
