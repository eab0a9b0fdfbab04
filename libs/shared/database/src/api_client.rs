use anyhow::{anyhow, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, Method,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::auth::{Credentials, HospitalLoginResponse, UserAuthResponse};

/// Bed counts reported by the HospiGo API for one hospital.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BedAvailability {
    pub hospital_id: i64,
    pub total: u32,
    pub available: u32,
}

/// Thin client for the external HospiGo API.
#[derive(Clone)]
pub struct HospiGoApiClient {
    client: Client,
    base_url: String,
}

impl HospiGoApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    pub async fn request<T>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        if self.base_url.is_empty() {
            return Err(anyhow!("HospiGo API URL is not configured"));
        }

        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let mut req = self.client.request(method, &url).headers(self.get_headers());

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("API error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => anyhow!("Authentication error: {}", error_text),
                404 => anyhow!("Resource not found: {}", error_text),
                _ => anyhow!("API error ({}): {}", status, error_text),
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    pub async fn hospital_login(&self, credentials: &Credentials) -> Result<HospitalLoginResponse> {
        self.request(
            Method::POST,
            "/hospital/login",
            Some(json!({
                "name": credentials.name,
                "password": credentials.password,
            })),
        )
        .await
    }

    pub async fn user_login(&self, credentials: &Credentials) -> Result<UserAuthResponse> {
        self.request(
            Method::POST,
            "/user/login",
            Some(json!({
                "name": credentials.name,
                "password": credentials.password,
            })),
        )
        .await
    }

    pub async fn user_register(&self, credentials: &Credentials) -> Result<UserAuthResponse> {
        self.request(
            Method::POST,
            "/user/register",
            Some(json!({
                "name": credentials.name,
                "password": credentials.password,
            })),
        )
        .await
    }

    pub async fn beds_availability(&self) -> Result<Vec<BedAvailability>> {
        self.request(Method::GET, "/hospitals/beds", None).await
    }
}
