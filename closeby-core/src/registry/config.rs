//! Configuration for the peer registry client

use std::time::Duration;

/// Environment variable overriding the registry base URL.
pub const REGISTRY_URL_ENV: &str = "CLOSEBY_REGISTRY_URL";

/// Environment variable overriding the request timeout, in milliseconds.
pub const REGISTRY_TIMEOUT_ENV: &str = "CLOSEBY_REGISTRY_TIMEOUT_MS";

/// Default registry base URL.
pub const DEFAULT_REGISTRY_URL: &str = "http://127.0.0.1:4582";

/// Configuration for the peer registry client
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Registry base URL (e.g., "http://127.0.0.1:4582")
    pub base_url: String,

    /// HTTP timeout per request
    pub timeout: Duration,

    /// User agent sent with every request
    pub user_agent: String,

    /// Proxy URL (for Tor support)
    pub proxy_url: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REGISTRY_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!(
                "Closeby/{}",
                option_env!("CARGO_PKG_VERSION").unwrap_or("0.1.0")
            ),
            proxy_url: None,
        }
    }
}

impl RegistryConfig {
    /// Creates a config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Reads overrides from the environment, falling back to defaults.
    ///
    /// An unparsable timeout is ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(REGISTRY_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url.trim().to_string();
            }
        }
        if let Some(ms) = std::env::var(REGISTRY_TIMEOUT_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            config.timeout = Duration::from_millis(ms);
        }
        config
    }

    /// Configure with Tor proxy
    ///
    /// Uses the default Tor SOCKS5 proxy at 127.0.0.1:9050 and
    /// increases the timeout to 60 seconds to account for Tor latency.
    pub fn with_tor(mut self) -> Self {
        self.proxy_url = Some("socks5://127.0.0.1:9050".to_string());
        self.timeout = Duration::from_secs(60);
        self
    }

    /// Configure with custom proxy
    pub fn with_proxy(mut self, proxy_url: String) -> Self {
        self.proxy_url = Some(proxy_url);
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Joins an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}
