use axum::Router;
use axum_test::TestServer;
use payvault_core::app_state::AppState;
use payvault_primitives::models::config::{AppConfig, JwtInfo, MonnifyInfo};
use payvault_primitives::models::user::{NewUser, User};
use secrecy::SecretString;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_CONTRACT_CODE: &str = "1003878399";

pub fn test_config(monnify_base: &str) -> AppConfig {
    AppConfig {
        jwt_details: JwtInfo {
            jwt_secret: SecretString::from("test_secret_key_minimum_32_characters_long"),
            jwt_expiration_hours: 2,
            jwt_issuer: "payvault".to_string(),
            jwt_audience: "payvault_api".to_string(),
        },
        monnify_details: MonnifyInfo {
            api_key: "MK_TEST_KEY".to_string(),
            secret_key: SecretString::from("test_monnify_secret"),
            base_url: monnify_base.to_string(),
            contract_code: TEST_CONTRACT_CODE.to_string(),
        },
    }
}

/// Test state pointing at a wiremock processor. The HTTP client uses a short
/// timeout so ambiguous-outcome paths can be exercised with a delayed mock.
pub fn test_state(monnify_base: &str) -> Arc<AppState> {
    init_test_env();

    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(800))
        .build()
        .expect("failed to build test HTTP client");

    AppState::with_http_client(test_config(monnify_base), http)
        .expect("failed to build test state")
}

#[allow(dead_code)]
pub fn create_test_app(state: Arc<AppState>) -> Router {
    payvault_api::app::create_router(state)
}

#[allow(dead_code)]
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    TestServer::new(create_test_app(state)).expect("failed to start test server")
}

fn init_test_env() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        // rate limiting is disabled under the test harness
        std::env::set_var("APP_ENV", "test");
    });
}

/// Seeds a user the way registration stores one. Tests that exercise the
/// login flow register through the endpoint instead, so the hash here never
/// has to verify.
#[allow(dead_code)]
pub fn seed_user(state: &AppState, email: &str, reference: Option<&str>) -> User {
    let user = state
        .users
        .create(NewUser {
            name: "Ada Obi",
            email,
            password_hash: "seeded-hash",
        })
        .expect("failed to seed user");

    match reference {
        Some(r) => {
            let mut updated = user;
            updated.account_reference = Some(r.to_string());
            state
                .users
                .save(updated)
                .expect("failed to save seeded user")
        }
        None => user,
    }
}

/// Seeds a user whose bank details are already reconciled.
#[allow(dead_code)]
pub fn seed_reconciled_user(
    state: &AppState,
    email: &str,
    reference: &str,
    account_number: &str,
) -> User {
    let mut user = seed_user(state, email, Some(reference));
    user.contract_code = Some(TEST_CONTRACT_CODE.to_string());
    user.account_name = Some("Ada Obi".to_string());
    user.currency_code = Some("NGN".to_string());
    user.bank_code = Some("035".to_string());
    user.bank_name = Some("Wema Bank".to_string());
    user.account_number = Some(account_number.to_string());
    state.users.save(user).expect("failed to save seeded user")
}

#[allow(dead_code)]
pub fn bearer_for(state: &AppState, user_id: Uuid) -> String {
    payvault_core::SecurityConfig::create_token(state, &user_id.to_string())
        .expect("failed to mint test token")
}

pub fn auth_body(expires_in: Option<u64>) -> Value {
    let mut body = json!({
        "requestSuccessful": true,
        "responseMessage": "success",
        "responseCode": "0",
        "responseBody": { "accessToken": "tok_live_abc123" }
    });
    if let Some(secs) = expires_in {
        body["responseBody"]["expiresIn"] = json!(secs);
    }
    body
}

#[allow(dead_code)]
pub async fn mount_auth_mock(server: &MockServer, expected_calls: u64) {
    mount_auth_mock_with_expiry(server, Some(3600), expected_calls).await;
}

#[allow(dead_code)]
pub async fn mount_auth_mock_with_expiry(
    server: &MockServer,
    expires_in: Option<u64>,
    expected_calls: u64,
) {
    Mock::given(method("POST"))
        .and(path("/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body(expires_in)))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub fn reserved_account_body(reference: &str, account_number: &str) -> Value {
    json!({
        "requestSuccessful": true,
        "responseMessage": "success",
        "responseCode": "0",
        "responseBody": {
            "accountReference": reference,
            "accountName": "Ada Obi",
            "currencyCode": "NGN",
            "contractCode": TEST_CONTRACT_CODE,
            "accounts": [
                {
                    "bankCode": "035",
                    "bankName": "Wema Bank",
                    "accountNumber": account_number
                }
            ]
        }
    })
}

#[allow(dead_code)]
pub fn recipient_body(bank_code: &str, account_number: &str, account_name: &str) -> Value {
    json!({
        "requestSuccessful": true,
        "responseMessage": "success",
        "responseCode": "0",
        "responseBody": {
            "bankCode": bank_code,
            "accountNumber": account_number,
            "accountName": account_name
        }
    })
}

#[allow(dead_code)]
pub fn disbursement_body(reference: &str, status: &str) -> Value {
    json!({
        "requestSuccessful": true,
        "responseMessage": "success",
        "responseCode": "0",
        "responseBody": {
            "status": status,
            "reference": reference,
            "providerTransactionId": "MNFY|20260807|000123"
        }
    })
}

#[allow(dead_code)]
pub fn processor_rejection(message: &str) -> Value {
    json!({
        "requestSuccessful": false,
        "responseMessage": message,
        "responseCode": "99"
    })
}
