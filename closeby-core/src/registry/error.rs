//! Registry Error Types

use thiserror::Error;

/// Errors returned by a peer registry client.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// Transport failure: connection refused, DNS, timeout, broken body.
    #[error("network error: {0}")]
    Network(String),

    /// The registry answered with a non-success HTTP status.
    #[error("HTTP error: {0}")]
    Status(u16),

    /// The response body did not have the expected shape.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The client could not be built from its configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl RegistryError {
    /// Returns true for transport failures and non-success statuses.
    pub fn is_network(&self) -> bool {
        matches!(self, RegistryError::Network(_) | RegistryError::Status(_))
    }

    /// Returns true for malformed response bodies.
    pub fn is_protocol(&self) -> bool {
        matches!(self, RegistryError::Protocol(_))
    }
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            RegistryError::Status(status.as_u16())
        } else if err.is_builder() {
            RegistryError::Configuration(err.to_string())
        } else {
            RegistryError::Network(err.to_string())
        }
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
