use tracing::{info, warn};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::services::audit_service::AuditService;
use payvault_primitives::error::ApiError;
use payvault_primitives::models::dtos::transfer_dto::{
    DisbursementOrder, TransferRequest, TransferResponse,
};

/// Issues the idempotency reference for a disbursement attempt. The
/// processor deduplicates disbursements sharing a reference: a fresh value
/// marks a fresh logical attempt, and an unknown-outcome retry must carry
/// the reference the failed attempt reported.
pub struct ReferenceGenerator;

impl ReferenceGenerator {
    pub fn next() -> Uuid {
        Uuid::new_v4()
    }
}

pub struct TransferService;

impl TransferService {
    pub async fn transfer(
        state: &AppState,
        user_id: Uuid,
        req: TransferRequest,
    ) -> Result<TransferResponse, ApiError> {
        let user = state
            .users
            .find_by_id(user_id)
            .ok_or_else(|| ApiError::NotFound("User no longer exists".into()))?;

        let source_reference = user.account_reference.clone().ok_or_else(|| {
            ApiError::NotFound("No reserved account to debit; provision one first".into())
        })?;

        // Reconciled copy when present, one processor lookup otherwise.
        let source_account_number = match user.account_number.clone() {
            Some(number) => number,
            None => {
                let detail = state.monnify.get_reserved_account(&source_reference).await?;
                detail
                    .accounts
                    .first()
                    .map(|account| account.account_number.clone())
                    .ok_or_else(|| {
                        ApiError::Reconciliation(
                            "Reserved account detail contained no bank accounts".into(),
                        )
                    })?
            }
        };

        // The recipient is validated on every attempt and the resolved legal
        // name is the one submitted, regardless of what the caller believes
        // the name to be.
        let recipient = state
            .monnify
            .validate_recipient(&req.destination_account_number, &req.destination_bank_code)
            .await?;

        let reference = req.reference.unwrap_or_else(ReferenceGenerator::next);

        let order = DisbursementOrder {
            amount: req.amount,
            reference,
            narration: req
                .narration
                .clone()
                .unwrap_or_else(|| "Funds transfer".to_string()),
            destination_bank_code: recipient.bank_code.clone(),
            destination_account_number: recipient.account_number.clone(),
            destination_account_name: recipient.account_name.clone(),
            source_account_number,
        };

        let result = match state.monnify.disburse(&order).await {
            Ok(body) => body,
            Err(e) => {
                warn!(
                    reference = %reference,
                    error = %e,
                    "Disbursement did not complete"
                );
                AuditService::log_event(
                    Some(user.id),
                    "transfer.failed",
                    Some("transfer"),
                    Some(&reference.to_string()),
                    serde_json::json!({
                        "amount": req.amount,
                        "destination_bank_code": order.destination_bank_code.clone(),
                        "destination_account_number": order.destination_account_number.clone(),
                    }),
                );
                return Err(e.into());
            }
        };

        AuditService::log_event(
            Some(user.id),
            "transfer.initiated",
            Some("transfer"),
            Some(&reference.to_string()),
            serde_json::json!({ "amount": req.amount, "status": result.status.clone() }),
        );

        info!(
            user_id = %user.id,
            reference = %reference,
            status = %result.status,
            "Disbursement submitted"
        );

        Ok(TransferResponse {
            status: result.status,
            reference,
            provider_transaction_id: result.provider_transaction_id,
        })
    }
}
