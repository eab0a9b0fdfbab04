use std::path::PathBuf;
use std::sync::Arc;

use axum::{body::Body, response::Response};
use serde::Serialize;
use serde_json::Value;

use shared_config::AppConfig;
use shared_database::{AppState, LocalStore};

pub struct TestConfig {
    pub api_base_url: String,
    pub data_dir: PathBuf,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            // Nothing listens here, so API calls fail fast unless a mock server is used.
            api_base_url: "http://127.0.0.1:9".to_string(),
            data_dir: PathBuf::from("./target/test-data"),
        }
    }
}

impl TestConfig {
    pub fn with_api(url: &str) -> Self {
        Self {
            api_base_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            api_base_url: self.api_base_url.clone(),
            data_dir: self.data_dir.clone(),
            simulated_latency_ms: 0,
            port: 0,
        }
    }

    /// State backed by a fresh in-memory store.
    pub fn to_state(&self) -> Arc<AppState> {
        Arc::new(AppState::with_store(
            self.to_app_config(),
            Arc::new(LocalStore::in_memory()),
        ))
    }

    pub fn to_state_with_store(&self, store: Arc<LocalStore>) -> Arc<AppState> {
        Arc::new(AppState::with_store(self.to_app_config(), store))
    }
}

pub fn test_state() -> Arc<AppState> {
    TestConfig::default().to_state()
}

/// Writes a JSON value into the store, as a previous session would have.
pub async fn seed<T: Serialize>(state: &AppState, key: &str, value: &T) {
    state
        .store
        .save(key, value)
        .await
        .expect("seeding the test store");
}

pub async fn response_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("reading response body");
    serde_json::from_slice(&body).expect("response body is JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::with_api("http://localhost:4010").to_app_config();

        assert_eq!(config.api_base_url, "http://localhost:4010");
        assert_eq!(config.simulated_latency_ms, 0);
        assert!(config.is_configured());
    }

    #[tokio::test]
    async fn test_seed_writes_json() {
        let state = test_state();
        seed(&state, "hospital_labs", &Vec::<u32>::new()).await;

        assert_eq!(state.store.get_item("hospital_labs").await.unwrap(), "[]");
    }
}
