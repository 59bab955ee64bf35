use eyre::{eyre, Report};
use secrecy::SecretString;
use std::env;

#[derive(Debug, Clone)]
pub struct MonnifyInfo {
    pub api_key: String,
    pub secret_key: SecretString,
    pub base_url: String,
    pub contract_code: String,
}

impl MonnifyInfo {
    pub fn new() -> Result<Self, Report> {
        Ok(Self {
            api_key: env::var("MONNIFY_API_KEY").map_err(|_| eyre!("MONNIFY_API_KEY must be set"))?,

            secret_key: SecretString::new(
                env::var("MONNIFY_SECRET_KEY")
                    .map_err(|_| eyre!("MONNIFY_SECRET_KEY must be set"))?
                    .into(),
            ),

            base_url: env::var("MONNIFY_BASE_URL")
                .unwrap_or_else(|_| "https://sandbox.monnify.com/api".into()),

            contract_code: env::var("MONNIFY_CONTRACT_CODE")
                .map_err(|_| eyre!("MONNIFY_CONTRACT_CODE must be set"))?,
        })
    }
}
