use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TransferRequest {
    #[validate(range(min = 1))]
    pub amount: i64,

    #[schema(example = "035")]
    #[validate(length(min = 3, max = 6))]
    pub destination_bank_code: String,

    #[validate(length(min = 3, max = 20))]
    pub destination_account_number: String,

    #[validate(length(max = 100))]
    pub narration: Option<String>,

    /// Omit for a fresh attempt. Supply the reference from a previous
    /// unknown-outcome response to retry that attempt without risking a
    /// duplicate payment.
    pub reference: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransferResponse {
    #[schema(example = "SUCCESS")]
    pub status: String,
    pub reference: Uuid,
    pub provider_transaction_id: Option<String>,
}

/// Fully resolved disbursement instruction handed to the processor client.
/// The destination name is always the validation-resolved one.
#[derive(Debug, Clone)]
pub struct DisbursementOrder {
    pub amount: i64,
    pub reference: Uuid,
    pub narration: String,
    pub destination_bank_code: String,
    pub destination_account_number: String,
    pub destination_account_name: String,
    pub source_account_number: String,
}
