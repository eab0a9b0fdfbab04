use tracing::debug;

use shared_config::AppConfig;

/// Waits for the configured artificial network delay used by the form flows.
pub async fn simulate_latency(config: &AppConfig) {
    let delay = config.simulated_latency();
    if delay.is_zero() {
        return;
    }
    debug!("Simulating {}ms of network latency", delay.as_millis());
    tokio::time::sleep(delay).await;
}
