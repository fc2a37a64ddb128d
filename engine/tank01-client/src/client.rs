use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::UpstreamError;

/// Anything that can answer a Tank01 GET with a decoded JSON body.
///
/// Page controllers only depend on this trait, so tests can swap the HTTP
/// client for canned responses.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value, UpstreamError>;
}

/// HTTP client for the Tank01 NFL API
pub struct Tank01Client {
    config: ClientConfig,
    client: Client,
}

impl Tank01Client {
    /// Create a new client instance
    pub fn new(config: ClientConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UpstreamError::Transport {
                endpoint: "<client>".to_string(),
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl Upstream for Tank01Client {
    async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value, UpstreamError> {
        let url = self.config.endpoint_url(endpoint);
        let started = Instant::now();

        debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .header("x-rapidapi-host", &self.config.host)
            .header("x-rapidapi-key", &self.config.api_key)
            .query(params)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                "{} failed with status {} after {:?}",
                endpoint,
                status.as_u16(),
                started.elapsed()
            );
            return Err(UpstreamError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await.map_err(|e| UpstreamError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;

        info!("Fetched {} ({}) in {:?}", endpoint, status.as_u16(), started.elapsed());
        Ok(body)
    }
}
