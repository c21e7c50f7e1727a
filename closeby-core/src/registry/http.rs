//! HTTP registry client
//!
//! Talks to the remote peer registry over plain HTTP GET requests:
//! - Query-string parameters only, no request body
//! - Non-success statuses are failures
//! - Proxy support (for Tor)
//! - Timeout configuration
//!
//! No retries happen here; the sync engine's timer is the retry loop.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::config::RegistryConfig;
use super::error::{RegistryError, RegistryResult};
use super::protocol::{
    parse_all_users, parse_distance_meters, query_params, ALL_USERS_PATH, NEAREST_DISTANCE_PATH,
};
use super::RegistryClient;
use crate::geo::Coordinate;

/// Peer registry client backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpRegistryClient {
    client: Client,
    config: RegistryConfig,
}

impl HttpRegistryClient {
    /// Create a new registry client from config
    pub fn new(config: &RegistryConfig) -> RegistryResult<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone());

        // Support proxy if configured (for Tor)
        if let Some(proxy_url) = &config.proxy_url {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| RegistryError::Configuration(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| RegistryError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    async fn get_text(
        &self,
        path: &str,
        user_id: &str,
        location: Option<Coordinate>,
    ) -> RegistryResult<String> {
        let url = self.config.endpoint(path);
        debug!(%url, "registry request");

        let response = self
            .client
            .get(&url)
            .query(&query_params(user_id, location))
            .send()
            .await?;

        // Only a plain 200 carries a usable body.
        if response.status() != StatusCode::OK {
            return Err(RegistryError::Status(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl RegistryClient for HttpRegistryClient {
    async fn fetch_all_users(
        &self,
        user_id: &str,
        location: Option<Coordinate>,
    ) -> RegistryResult<Vec<Coordinate>> {
        let body = self.get_text(ALL_USERS_PATH, user_id, location).await?;
        parse_all_users(&body)
    }

    async fn fetch_nearest_distance(
        &self,
        user_id: &str,
        location: Option<Coordinate>,
    ) -> RegistryResult<f64> {
        let body = self.get_text(NEAREST_DISTANCE_PATH, user_id, location).await?;
        parse_distance_meters(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_default_config() {
        let client = HttpRegistryClient::new(&RegistryConfig::default()).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:4582");
    }
}
