//! CLI Configuration

use std::time::Duration;

use anyhow::{Context, Result};
use closeby_core::{HttpRegistryClient, RegistryConfig};

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Peer registry base URL.
    pub registry_url: String,
    /// Fixed user id, if given.
    pub user_id: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Route through the local Tor proxy.
    pub tor: bool,
}

impl CliConfig {
    /// Returns the registry client configuration.
    pub fn registry_config(&self) -> RegistryConfig {
        let config = RegistryConfig::new(self.registry_url.clone());
        if self.tor {
            // The Tor preset raises the timeout; keep an explicit larger one.
            let tor = config.with_tor();
            let timeout = tor.timeout.max(self.timeout);
            tor.with_timeout(timeout)
        } else {
            config.with_timeout(self.timeout)
        }
    }

    /// Builds the HTTP registry client.
    pub fn registry_client(&self) -> Result<HttpRegistryClient> {
        HttpRegistryClient::new(&self.registry_config())
            .with_context(|| format!("Failed to configure registry client for {}", self.registry_url))
    }

    /// Returns the configured user id or a fresh one.
    pub fn user_id(&self) -> String {
        self.user_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
    }
}
