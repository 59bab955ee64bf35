use eyre::Result;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::MonnifyClient;
use crate::repositories::UserStore;
pub use payvault_primitives::models::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub users: UserStore,
    pub http_client: Client,
    pub config: AppConfig,
    pub monnify: MonnifyClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Arc<Self>> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Self::with_http_client(config, http)
    }

    pub fn with_http_client(config: AppConfig, http: Client) -> Result<Arc<Self>> {
        let monnify = MonnifyClient::new(
            http.clone(),
            &config.monnify_details.base_url,
            config.monnify_details.api_key.clone(),
            config.monnify_details.secret_key.clone(),
            config.monnify_details.contract_code.clone(),
        )?;

        Ok(Arc::new(Self {
            users: UserStore::new(),
            http_client: http,
            config,
            monnify,
        }))
    }
}
