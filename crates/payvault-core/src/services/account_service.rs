use chrono::Utc;
use tracing::{error, info, warn};

use crate::app_state::AppState;
use crate::services::audit_service::AuditService;
use payvault_primitives::error::ApiError;
use payvault_primitives::models::dtos::account_dto::AccountDetailResponse;
use payvault_primitives::models::dtos::providers::monnify::AccountDetailBody;
use payvault_primitives::models::user::User;

pub struct AccountService;

impl AccountService {
    /// Provisions a reserved account for `user` and persists the returned
    /// reference. Idempotent: an existing reference is returned as-is, and
    /// the upstream account is keyed by the user id, so repeating the
    /// create cannot mint a duplicate.
    pub async fn open_reserved_account(state: &AppState, user: User) -> Result<User, ApiError> {
        if user.account_reference.is_some() {
            return Ok(user);
        }

        let detail = state
            .monnify
            .create_reserved_account(user.id, &user.name, &user.email)
            .await?;

        let mut updated = user;
        updated.account_reference = Some(detail.account_reference.clone());
        updated.updated_at = Utc::now();

        let updated = match state.users.save(updated) {
            Ok(saved) => saved,
            Err(e) => {
                // The account exists upstream but the local record could not
                // be updated. No compensating delete: the inconsistency is
                // recorded and resolved by re-querying.
                error!(
                    account_reference = %detail.account_reference,
                    error = %e,
                    "Reserved account created upstream but local persist failed"
                );
                AuditService::log_event(
                    None,
                    "account.persist_failed",
                    Some("account"),
                    Some(&detail.account_reference),
                    serde_json::json!({ "account_reference": detail.account_reference.clone() }),
                );
                return Err(e);
            }
        };

        AuditService::log_event(
            Some(updated.id),
            "account.created",
            Some("account"),
            updated.account_reference.as_deref(),
            serde_json::json!({ "account_reference": updated.account_reference.clone() }),
        );

        info!(
            user_id = %updated.id,
            account_reference = ?updated.account_reference,
            "Reserved account provisioned"
        );

        Ok(updated)
    }

    /// Resolves the local owner of `reference`, refreshes the processor's
    /// view of the account and reconciles it into the stored record. A
    /// reference with no local owner is rejected before any processor call.
    pub async fn get_account_details(
        state: &AppState,
        reference: &str,
    ) -> Result<AccountDetailResponse, ApiError> {
        let user = state
            .users
            .find_by_account_reference(reference)
            .ok_or_else(|| ApiError::NotFound(format!("No account with reference {}", reference)))?;

        let detail = state.monnify.get_reserved_account(reference).await?;

        Self::reconcile(state, user, &detail)?;

        Ok(AccountDetailResponse::from(detail))
    }

    /// Copies the processor-reported account fields onto the local record:
    /// contract code, account name, currency, and the first entry of the
    /// bank-accounts list. A no-op when nothing changed, so reconciling
    /// twice with the same detail leaves the stored record untouched.
    pub fn reconcile(
        state: &AppState,
        user: User,
        detail: &AccountDetailBody,
    ) -> Result<User, ApiError> {
        let primary = detail.accounts.first().ok_or_else(|| {
            warn!(
                account_reference = %detail.account_reference,
                "Reserved account detail contained no bank accounts"
            );
            ApiError::Reconciliation("Reserved account detail contained no bank accounts".into())
        })?;

        let mut updated = user.clone();
        updated.contract_code = Some(detail.contract_code.clone());
        updated.account_name = Some(detail.account_name.clone());
        updated.currency_code = Some(detail.currency_code.clone());
        updated.bank_code = Some(primary.bank_code.clone());
        updated.bank_name = Some(primary.bank_name.clone());
        updated.account_number = Some(primary.account_number.clone());

        if updated == user {
            return Ok(user);
        }

        updated.updated_at = Utc::now();
        state.users.save(updated)
    }
}
