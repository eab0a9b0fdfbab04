use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub data_dir: PathBuf,
    pub simulated_latency_ms: u64,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            api_base_url: env::var("HOSPIGO_API_URL")
                .unwrap_or_else(|_| {
                    warn!("HOSPIGO_API_URL not set, using default");
                    "http://localhost:8000".to_string()
                }),
            data_dir: env::var("HOSPIGO_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    warn!("HOSPIGO_DATA_DIR not set, using ./data");
                    PathBuf::from("./data")
                }),
            simulated_latency_ms: env::var("HOSPIGO_SIMULATED_LATENCY_MS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or_else(|| {
                    warn!("HOSPIGO_SIMULATED_LATENCY_MS not set or invalid, using 1000ms");
                    1000
                }),
            port: env::var("HOSPIGO_PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(3000),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - HospiGo API URL is empty");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.api_base_url.is_empty()
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}
