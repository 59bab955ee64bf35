use crate::models::config::jwt_details::JwtInfo;
use crate::models::config::monnify_details::MonnifyInfo;
use eyre::Report;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_details: JwtInfo,

    pub monnify_details: MonnifyInfo,
}

impl AppConfig {
    /// Loads the full configuration surface, failing at startup when a
    /// required variable is absent.
    pub fn from_env() -> Result<Self, Report> {
        Ok(Self {
            jwt_details: JwtInfo::new()?,

            monnify_details: MonnifyInfo::new()?,
        })
    }
}
