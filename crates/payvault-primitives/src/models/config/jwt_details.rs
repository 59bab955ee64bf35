use eyre::{eyre, Report};
use secrecy::SecretString;
use std::env;

#[derive(Debug, Clone)]
pub struct JwtInfo {
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub jwt_issuer: String,
    pub jwt_audience: String,
}

impl JwtInfo {
    pub fn new() -> Result<Self, Report> {
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| eyre!("JWT_SECRET must be set"))?;

        if jwt_secret.len() < 32 {
            return Err(eyre!("JWT_SECRET must be at least 32 characters long"));
        }

        Ok(Self {
            jwt_secret: SecretString::new(jwt_secret.into()),

            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "2".into())
                .parse()
                .map_err(|e| eyre!("Invalid JWT expiration configuration: {}", e))?,

            jwt_issuer: env::var("ISSUER").unwrap_or_else(|_| "payvault".into()),

            jwt_audience: env::var("AUDIENCE").unwrap_or_else(|_| "payvault_api".into()),
        })
    }
}
