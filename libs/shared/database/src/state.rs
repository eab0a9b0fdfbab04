use std::sync::Arc;

use shared_config::AppConfig;

use crate::api_client::HospiGoApiClient;
use crate::local_store::{LocalStore, StoreError};

/// Shared handler state: configuration, the persisted namespace and the API client.
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<LocalStore>,
    pub api: HospiGoApiClient,
}

impl AppState {
    pub async fn from_config(config: AppConfig) -> Result<Self, StoreError> {
        let store = LocalStore::open(&config.data_dir).await?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    pub fn with_store(config: AppConfig, store: Arc<LocalStore>) -> Self {
        let api = HospiGoApiClient::new(&config);
        Self { config, store, api }
    }
}
