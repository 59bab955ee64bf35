mod common;

use common::*;
use http::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_validate_mock(mock: &MockServer, bank_code: &str, account_number: &str, name: &str) {
    Mock::given(method("GET"))
        .and(path("/v1/disbursements/account/validate"))
        .and(query_param("accountNumber", account_number))
        .and(query_param("bankCode", bank_code))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(recipient_body(bank_code, account_number, name)),
        )
        .mount(mock)
        .await;
}

#[tokio::test]
async fn disbursement_carries_the_resolved_recipient_name() {
    let mock = MockServer::start().await;
    mount_auth_mock(&mock, 1).await;
    mount_validate_mock(&mock, "035", "001", "B").await;

    // the submitted name must be the validation-resolved "B", and the
    // source account the sender's reconciled one
    Mock::given(method("POST"))
        .and(path("/v2/disbursements/single"))
        .and(body_partial_json(json!({
            "amount": 500,
            "currency": "NGN",
            "destinationBankCode": "035",
            "destinationAccountNumber": "001",
            "destinationAccountName": "B",
            "sourceAccountNumber": "7000000001",
            "narration": "Funds transfer"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(disbursement_body("ignored", "SUCCESS")),
        )
        .expect(1)
        .mount(&mock)
        .await;

    let state = test_state(&mock.uri());
    let user = seed_reconciled_user(&state, "sender@x.com", "REF1", "7000000001");
    let token = bearer_for(&state, user.id);
    let server = create_test_server(state);

    let response = server
        .post("/api/transfers")
        .authorization_bearer(&token)
        .json(&json!({
            "amount": 500,
            "destination_bank_code": "035",
            "destination_account_number": "001"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "SUCCESS");
    assert!(Uuid::parse_str(body["reference"].as_str().unwrap()).is_ok());

    mock.verify().await;
}

#[tokio::test]
async fn source_account_is_fetched_when_not_yet_reconciled() {
    let mock = MockServer::start().await;
    mount_auth_mock(&mock, 1).await;
    mount_validate_mock(&mock, "035", "0012345678", "Bola Tinu").await;

    Mock::given(method("GET"))
        .and(path("/v1/bank-transfer/reserved-accounts/REF1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(reserved_account_body("REF1", "7000000009")),
        )
        .expect(1)
        .mount(&mock)
        .await;

    Mock::given(method("POST"))
        .and(path("/v2/disbursements/single"))
        .and(body_partial_json(json!({ "sourceAccountNumber": "7000000009" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(disbursement_body("ignored", "SUCCESS")),
        )
        .expect(1)
        .mount(&mock)
        .await;

    let state = test_state(&mock.uri());
    let user = seed_user(&state, "unreconciled@x.com", Some("REF1"));
    let token = bearer_for(&state, user.id);
    let server = create_test_server(state);

    let response = server
        .post("/api/transfers")
        .authorization_bearer(&token)
        .json(&json!({
            "amount": 2500,
            "destination_bank_code": "035",
            "destination_account_number": "0012345678"
        }))
        .await;

    response.assert_status_ok();
    mock.verify().await;
}

#[tokio::test]
async fn timed_out_disbursement_reports_an_unknown_outcome() {
    let mock = MockServer::start().await;
    mount_auth_mock(&mock, 1).await;
    mount_validate_mock(&mock, "035", "001", "B").await;

    let reference = Uuid::new_v4();

    // response arrives after the client timeout: the transfer may or may
    // not have executed
    Mock::given(method("POST"))
        .and(path("/v2/disbursements/single"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(disbursement_body(&reference.to_string(), "SUCCESS"))
                .set_delay(Duration::from_secs(3)),
        )
        .expect(1)
        .mount(&mock)
        .await;

    let state = test_state(&mock.uri());
    let user = seed_reconciled_user(&state, "timeout@x.com", "REF1", "7000000001");
    let token = bearer_for(&state, user.id);
    let server = create_test_server(state);

    let response = server
        .post("/api/transfers")
        .authorization_bearer(&token)
        .json(&json!({
            "amount": 500,
            "destination_bank_code": "035",
            "destination_account_number": "001",
            "reference": reference
        }))
        .await;

    // not a success, not a generic failure: a distinct pending/unknown
    // status carrying the reference to reuse
    response.assert_status(StatusCode::ACCEPTED);
    let body: Value = response.json();
    assert_eq!(body["code"], "transfer_outcome_unknown");
    assert_eq!(body["reference"], reference.to_string());
}

#[tokio::test]
async fn unknown_outcome_retry_reuses_the_reported_reference() {
    let mock = MockServer::start().await;
    mount_auth_mock(&mock, 1).await;
    mount_validate_mock(&mock, "035", "001", "B").await;

    Mock::given(method("POST"))
        .and(path("/v2/disbursements/single"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(disbursement_body("ignored", "SUCCESS"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock)
        .await;

    let state = test_state(&mock.uri());
    let user = seed_reconciled_user(&state, "retry-ref@x.com", "REF1", "7000000001");
    let token = bearer_for(&state, user.id);
    let server = create_test_server(state);

    let payload = json!({
        "amount": 500,
        "destination_bank_code": "035",
        "destination_account_number": "001"
    });

    let first = server
        .post("/api/transfers")
        .authorization_bearer(&token)
        .json(&payload)
        .await;
    first.assert_status(StatusCode::ACCEPTED);
    let reported = first.json::<Value>()["reference"].as_str().unwrap().to_string();

    // the retry must submit the same idempotency reference so the
    // processor deduplicates
    mock.reset().await;
    mount_auth_mock(&mock, 0).await;
    mount_validate_mock(&mock, "035", "001", "B").await;
    Mock::given(method("POST"))
        .and(path("/v2/disbursements/single"))
        .and(body_partial_json(json!({ "reference": reported })))
        .respond_with(ResponseTemplate::new(200).set_body_json(disbursement_body(&reported, "SUCCESS")))
        .expect(1)
        .mount(&mock)
        .await;

    let retry = server
        .post("/api/transfers")
        .authorization_bearer(&token)
        .json(&json!({
            "amount": 500,
            "destination_bank_code": "035",
            "destination_account_number": "001",
            "reference": reported
        }))
        .await;

    retry.assert_status_ok();
    assert_eq!(retry.json::<Value>()["reference"], reported);

    mock.verify().await;
}

#[tokio::test]
async fn confirmed_rejection_is_a_distinct_failure() {
    let mock = MockServer::start().await;
    mount_auth_mock(&mock, 1).await;
    mount_validate_mock(&mock, "035", "001", "B").await;

    Mock::given(method("POST"))
        .and(path("/v2/disbursements/single"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(processor_rejection("insufficient balance")),
        )
        .expect(1)
        .mount(&mock)
        .await;

    let state = test_state(&mock.uri());
    let user = seed_reconciled_user(&state, "rejected@x.com", "REF1", "7000000001");
    let token = bearer_for(&state, user.id);
    let server = create_test_server(state);

    let response = server
        .post("/api/transfers")
        .authorization_bearer(&token)
        .json(&json!({
            "amount": 500,
            "destination_bank_code": "035",
            "destination_account_number": "001"
        }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["code"], "upstream_transfer_failed");
}

#[tokio::test]
async fn transfer_without_a_reserved_account_is_rejected_locally() {
    let mock = MockServer::start().await;

    let state = test_state(&mock.uri());
    let user = seed_user(&state, "no-account@x.com", None);
    let token = bearer_for(&state, user.id);
    let server = create_test_server(state);

    let response = server
        .post("/api/transfers")
        .authorization_bearer(&token)
        .json(&json!({
            "amount": 500,
            "destination_bank_code": "035",
            "destination_account_number": "001"
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);

    let requests = mock.received_requests().await.expect("requests recorded");
    assert!(requests.is_empty());
}
