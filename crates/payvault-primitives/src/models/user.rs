use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Local user record. `account_reference` is set if and only if a reserved
/// account was successfully created upstream; the bank fields stay unset
/// until reconciliation copies them from the processor's view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub account_reference: Option<String>,
    pub contract_code: Option<String>,
    pub account_name: Option<String>,
    pub currency_code: Option<String>,
    pub bank_code: Option<String>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}
