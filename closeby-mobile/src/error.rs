//! Mobile-friendly error types.

use closeby_core::{EngineError, RegistryError};

/// Mobile-friendly error type.
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MobileError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Engine stopped")]
    EngineStopped,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RegistryError> for MobileError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Configuration(msg) => MobileError::ConfigurationError(msg),
            other => MobileError::NetworkError(other.to_string()),
        }
    }
}

impl From<EngineError> for MobileError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Stopped => MobileError::EngineStopped,
            EngineError::Registry(e) => e.into(),
            other => MobileError::Internal(other.to_string()),
        }
    }
}
