use serde::{Deserialize, Serialize};

/// Envelope wrapped around every processor response. Bodies are parsed
/// defensively: `response_body` is optional so a missing payload surfaces as
/// the calling operation's error class instead of a deserialization panic.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct MonnifyEnvelope<T> {
    #[serde(default)]
    pub request_successful: bool,
    #[serde(default)]
    pub response_message: Option<String>,
    #[serde(default)]
    pub response_code: Option<String>,
    #[serde(default)]
    pub response_body: Option<T>,
}

impl<T> MonnifyEnvelope<T> {
    pub fn message(&self) -> &str {
        self.response_message
            .as_deref()
            .unwrap_or("no message from processor")
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBody {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservedBankAccount {
    pub bank_code: String,
    pub bank_name: String,
    pub account_number: String,
}

/// Detail shape shared by reserved-account creation and lookup. Creation
/// responses may omit the provisioned bank accounts.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetailBody {
    pub account_reference: String,
    pub account_name: String,
    pub currency_code: String,
    pub contract_code: String,
    #[serde(default)]
    pub accounts: Vec<ReservedBankAccount>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientBody {
    pub bank_code: String,
    pub account_number: String,
    pub account_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisbursementBody {
    pub status: String,
    pub reference: String,
    #[serde(default)]
    pub provider_transaction_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservedAccountRequest<'a> {
    pub account_reference: &'a str,
    pub account_name: &'a str,
    pub currency_code: &'a str,
    pub contract_code: &'a str,
    pub customer_email: &'a str,
    pub customer_name: &'a str,
    pub get_all_available_banks: bool,
    pub preferred_banks: &'a [&'a str],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisbursementRequest<'a> {
    pub amount: i64,
    pub reference: String,
    pub narration: &'a str,
    pub destination_bank_code: &'a str,
    pub destination_account_number: &'a str,
    pub currency: &'a str,
    pub source_account_number: &'a str,
    pub destination_account_name: &'a str,
}
