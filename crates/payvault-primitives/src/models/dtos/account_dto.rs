use crate::models::dtos::auth_dto::UserResponse;
use crate::models::dtos::providers::monnify::AccountDetailBody;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct OpenAccountResponse {
    pub account_reference: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BankAccountDto {
    #[schema(example = "035")]
    pub bank_code: String,
    #[schema(example = "Wema Bank")]
    pub bank_name: String,
    pub account_number: String,
}

/// The processor's current view of a reserved account, as returned to the
/// caller after reconciliation.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountDetailResponse {
    pub account_reference: String,
    pub account_name: String,
    pub currency_code: String,
    pub contract_code: String,
    pub accounts: Vec<BankAccountDto>,
}

impl From<AccountDetailBody> for AccountDetailResponse {
    fn from(body: AccountDetailBody) -> Self {
        Self {
            account_reference: body.account_reference,
            account_name: body.account_name,
            currency_code: body.currency_code,
            contract_code: body.contract_code,
            accounts: body
                .accounts
                .into_iter()
                .map(|account| BankAccountDto {
                    bank_code: account.bank_code,
                    bank_name: account.bank_name,
                    account_number: account.account_number,
                })
                .collect(),
        }
    }
}
