use serde::Deserialize;
use std::env;

/// Public API endpoint of the original deployment
const DEFAULT_API_URL: &str = "https://betsocial-fde6ef886274.herokuapp.com";

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
}

impl ClientConfig {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(ClientConfig {
            api_base_url: env::var("BETSOCIAL_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            request_timeout_secs: env::var("BETSOCIAL_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,
            max_retries: env::var("BETSOCIAL_MAX_RETRIES")
                .unwrap_or_else(|_| "3".to_string())
                .parse()?,
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: 10,
            max_retries: 3,
        }
    }
}
