use payvault_primitives::error::{ApiError, MonnifyError};
use payvault_primitives::models::dtos::providers::monnify::{
    AccountDetailBody, CreateReservedAccountRequest, DisbursementBody, DisbursementRequest,
    MonnifyEnvelope, RecipientBody, TokenBody,
};
use payvault_primitives::models::dtos::transfer_dto::DisbursementOrder;
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use std::future::Future;
use tracing::{error, warn};
use uuid::Uuid;

use crate::clients::token::{CachedToken, TokenManager};

/// Settlement currency for reserved accounts and disbursements.
pub const CURRENCY_CODE: &str = "NGN";

/// Banks requested when provisioning a reserved account.
const PREFERRED_BANKS: &[&str] = &["035"];

/// Client for the payment processor. Authentication exchanges the API
/// key/secret over Basic auth; every other call carries the cached Bearer
/// token and re-authenticates exactly once if the processor rejects it.
#[derive(Clone)]
pub struct MonnifyClient {
    http: Client,
    base_url: Url,
    api_key: String,
    secret_key: SecretString,
    contract_code: String,
    tokens: TokenManager,
}

impl MonnifyClient {
    pub fn new(
        http: Client,
        base_url: &str,
        api_key: String,
        secret_key: SecretString,
        contract_code: String,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|_| ApiError::Internal("Invalid Monnify base URL".into()))?;

        Ok(Self {
            http,
            base_url,
            api_key,
            secret_key,
            contract_code,
            tokens: TokenManager::new(),
        })
    }

    pub fn contract_code(&self) -> &str {
        &self.contract_code
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    async fn authenticate(&self) -> Result<CachedToken, MonnifyError> {
        let resp = self
            .http
            .post(self.endpoint("/v1/auth/login"))
            .basic_auth(&self.api_key, Some(self.secret_key.expose_secret()))
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to reach Monnify for authentication");
                MonnifyError::Unreachable(e.to_string())
            })?;

        let status = resp.status();
        let body_text = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            warn!(
                http_status = status.as_u16(),
                response = %truncate(&body_text),
                "Monnify authentication rejected"
            );
            return Err(MonnifyError::Auth(format!(
                "authentication failed with status {}",
                status
            )));
        }

        let body: MonnifyEnvelope<TokenBody> = serde_json::from_str(&body_text).map_err(|e| {
            error!(
                parse_error = %e,
                response = %truncate(&body_text),
                "Invalid JSON from Monnify authentication"
            );
            MonnifyError::Auth("invalid authentication response".into())
        })?;

        if !body.request_successful {
            return Err(MonnifyError::Auth(body.message().to_string()));
        }

        let token = body
            .response_body
            .ok_or_else(|| MonnifyError::Auth("authentication response missing accessToken".into()))?;

        Ok(CachedToken::new(
            SecretString::new(token.access_token.into()),
            token.expires_in,
        ))
    }

    async fn bearer(&self) -> Result<SecretString, MonnifyError> {
        self.tokens.bearer_token(|| self.authenticate()).await
    }

    /// Runs `op` with a valid bearer token. If the processor rejects the
    /// token mid-flight, the cache is invalidated and the call is retried
    /// once with a fresh token, never more.
    async fn with_token<T, F, Fut>(&self, op: F) -> Result<T, MonnifyError>
    where
        F: Fn(SecretString) -> Fut,
        Fut: Future<Output = Result<T, MonnifyError>>,
    {
        let token = self.bearer().await?;

        match op(token).await {
            Err(MonnifyError::Auth(msg)) => {
                warn!(error = %msg, "Monnify rejected the access token, re-authenticating");
                self.tokens.invalidate().await;
                let token = self.bearer().await?;
                op(token).await
            }
            other => other,
        }
    }

    /// Provisions a reserved account keyed by the owner's id. Retrying with
    /// the same owner cannot mint a duplicate: the processor deduplicates on
    /// the caller-supplied reference.
    pub async fn create_reserved_account(
        &self,
        owner_id: Uuid,
        owner_name: &str,
        owner_email: &str,
    ) -> Result<AccountDetailBody, MonnifyError> {
        let reference = owner_id.to_string();
        self.with_token(|token| {
            self.submit_reserved_account(token, &reference, owner_name, owner_email)
        })
        .await
    }

    async fn submit_reserved_account(
        &self,
        token: SecretString,
        reference: &str,
        owner_name: &str,
        owner_email: &str,
    ) -> Result<AccountDetailBody, MonnifyError> {
        let payload = CreateReservedAccountRequest {
            account_reference: reference,
            account_name: owner_name,
            currency_code: CURRENCY_CODE,
            contract_code: &self.contract_code,
            customer_email: owner_email,
            customer_name: owner_name,
            get_all_available_banks: false,
            preferred_banks: PREFERRED_BANKS,
        };

        let resp = self
            .http
            .post(self.endpoint("/v2/bank-transfer/reserved-accounts"))
            .bearer_auth(token.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to reach Monnify for reserved account creation");
                MonnifyError::Unreachable(e.to_string())
            })?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(MonnifyError::Auth("access token rejected".into()));
        }

        let body_text = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            warn!(
                http_status = status.as_u16(),
                response = %truncate(&body_text),
                "Monnify reserved account creation failed"
            );
            return Err(MonnifyError::Account(format!(
                "reserved account creation failed with status {}",
                status
            )));
        }

        let body: MonnifyEnvelope<AccountDetailBody> =
            serde_json::from_str(&body_text).map_err(|e| {
                error!(
                    parse_error = %e,
                    response = %truncate(&body_text),
                    "Invalid JSON from Monnify reserved account creation"
                );
                MonnifyError::Account("invalid reserved account response".into())
            })?;

        if !body.request_successful {
            return Err(MonnifyError::Account(body.message().to_string()));
        }

        body.response_body
            .ok_or_else(|| MonnifyError::Account("response missing accountReference".into()))
    }

    /// Fetches the processor's current view of a reserved account. An
    /// upstream 404 is a `Lookup` failure, distinct from a transport error,
    /// so the caller can decide whether a retry makes sense.
    pub async fn get_reserved_account(
        &self,
        reference: &str,
    ) -> Result<AccountDetailBody, MonnifyError> {
        self.with_token(|token| self.fetch_reserved_account(token, reference))
            .await
    }

    async fn fetch_reserved_account(
        &self,
        token: SecretString,
        reference: &str,
    ) -> Result<AccountDetailBody, MonnifyError> {
        let resp = self
            .http
            .get(self.endpoint(&format!("/v1/bank-transfer/reserved-accounts/{}", reference)))
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to reach Monnify for reserved account lookup");
                MonnifyError::Unreachable(e.to_string())
            })?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(MonnifyError::Auth("access token rejected".into()));
        }
        if status == StatusCode::NOT_FOUND {
            return Err(MonnifyError::Lookup(format!(
                "account reference {} is unknown upstream",
                reference
            )));
        }

        let body_text = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            warn!(
                http_status = status.as_u16(),
                response = %truncate(&body_text),
                "Monnify reserved account lookup failed"
            );
            return Err(MonnifyError::Lookup(format!(
                "reserved account lookup failed with status {}",
                status
            )));
        }

        let body: MonnifyEnvelope<AccountDetailBody> =
            serde_json::from_str(&body_text).map_err(|e| {
                error!(
                    parse_error = %e,
                    response = %truncate(&body_text),
                    "Invalid JSON from Monnify reserved account lookup"
                );
                MonnifyError::Lookup("invalid reserved account detail response".into())
            })?;

        if !body.request_successful {
            return Err(MonnifyError::Lookup(body.message().to_string()));
        }

        body.response_body
            .ok_or_else(|| MonnifyError::Lookup("response missing account detail".into()))
    }

    /// Confirms a destination account exists and resolves its legal name.
    /// Runs before every disbursement, no exceptions.
    pub async fn validate_recipient(
        &self,
        account_number: &str,
        bank_code: &str,
    ) -> Result<RecipientBody, MonnifyError> {
        self.with_token(|token| self.resolve_recipient(token, account_number, bank_code))
            .await
    }

    async fn resolve_recipient(
        &self,
        token: SecretString,
        account_number: &str,
        bank_code: &str,
    ) -> Result<RecipientBody, MonnifyError> {
        let resp = self
            .http
            .get(self.endpoint("/v1/disbursements/account/validate"))
            .query(&[("accountNumber", account_number), ("bankCode", bank_code)])
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to reach Monnify for recipient validation");
                MonnifyError::Unreachable(e.to_string())
            })?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(MonnifyError::Auth("access token rejected".into()));
        }

        let body_text = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            warn!(
                http_status = status.as_u16(),
                response = %truncate(&body_text),
                "Monnify recipient validation failed"
            );
            return Err(MonnifyError::Lookup(format!(
                "recipient account could not be validated, status {}",
                status
            )));
        }

        let body: MonnifyEnvelope<RecipientBody> =
            serde_json::from_str(&body_text).map_err(|e| {
                error!(
                    parse_error = %e,
                    response = %truncate(&body_text),
                    "Invalid JSON from Monnify recipient validation"
                );
                MonnifyError::Lookup("invalid recipient validation response".into())
            })?;

        if !body.request_successful {
            return Err(MonnifyError::Lookup(body.message().to_string()));
        }

        body.response_body
            .ok_or_else(|| MonnifyError::Lookup("validation response missing account data".into()))
    }

    /// Submits a disbursement. A confirmed rejection is `Transfer`; any
    /// transport failure after the request may have left the processor is an
    /// `UnknownOutcome` carrying the idempotency reference, because the
    /// funds may have moved.
    pub async fn disburse(&self, order: &DisbursementOrder) -> Result<DisbursementBody, MonnifyError> {
        self.with_token(|token| self.submit_disbursement(token, order))
            .await
    }

    async fn submit_disbursement(
        &self,
        token: SecretString,
        order: &DisbursementOrder,
    ) -> Result<DisbursementBody, MonnifyError> {
        let payload = DisbursementRequest {
            amount: order.amount,
            reference: order.reference.to_string(),
            narration: &order.narration,
            destination_bank_code: &order.destination_bank_code,
            destination_account_number: &order.destination_account_number,
            currency: CURRENCY_CODE,
            source_account_number: &order.source_account_number,
            destination_account_name: &order.destination_account_name,
        };

        let resp = match self
            .http
            .post(self.endpoint("/v2/disbursements/single"))
            .bearer_auth(token.expose_secret())
            .json(&payload)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                error!(
                    error = %e,
                    reference = %order.reference,
                    "Disbursement outcome unknown after transport failure"
                );
                return Err(MonnifyError::UnknownOutcome {
                    reference: order.reference,
                });
            }
        };

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            // Rejected before processing; one retry with the same reference
            // is safe.
            return Err(MonnifyError::Auth("access token rejected".into()));
        }

        let body_text = match resp.text().await {
            Ok(text) => text,
            Err(e) => {
                error!(
                    error = %e,
                    reference = %order.reference,
                    "Disbursement response body unreadable"
                );
                return Err(MonnifyError::UnknownOutcome {
                    reference: order.reference,
                });
            }
        };

        if !status.is_success() {
            warn!(
                http_status = status.as_u16(),
                response = %truncate(&body_text),
                reference = %order.reference,
                "Monnify rejected disbursement"
            );
            return Err(MonnifyError::Transfer(format!(
                "disbursement failed with status {}",
                status
            )));
        }

        let body: MonnifyEnvelope<DisbursementBody> = match serde_json::from_str(&body_text) {
            Ok(body) => body,
            Err(e) => {
                // A 2xx with an unparseable body still means the instruction
                // reached the processor.
                error!(
                    parse_error = %e,
                    response = %truncate(&body_text),
                    reference = %order.reference,
                    "Invalid JSON from Monnify disbursement"
                );
                return Err(MonnifyError::UnknownOutcome {
                    reference: order.reference,
                });
            }
        };

        if !body.request_successful {
            return Err(MonnifyError::Transfer(body.message().to_string()));
        }

        body.response_body.ok_or(MonnifyError::UnknownOutcome {
            reference: order.reference,
        })
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}
