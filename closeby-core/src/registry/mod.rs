// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Peer Registry Client
//!
//! Thin client for the remote peer registry. Two request shapes exist:
//! - **all users**: every known position, used while foregrounded
//! - **distance to nearest user**: a single number, used in the background
//!
//! # Example
//!
//! ```ignore
//! use closeby_core::registry::{HttpRegistryClient, RegistryClient, RegistryConfig};
//!
//! let client = HttpRegistryClient::new(&RegistryConfig::from_env())?;
//! let users = client.fetch_all_users("my-id", Some(location)).await?;
//! ```

mod config;
mod error;
#[cfg(feature = "reqwest")]
mod http;
mod mock;
pub mod protocol;

use async_trait::async_trait;

use crate::geo::Coordinate;

pub use config::{
    RegistryConfig, DEFAULT_REGISTRY_URL, REGISTRY_TIMEOUT_ENV, REGISTRY_URL_ENV,
};
pub use error::{RegistryError, RegistryResult};
#[cfg(feature = "reqwest")]
pub use http::HttpRegistryClient;
pub use mock::{MockRegistry, RegistryCall};

/// Client for the remote peer registry.
///
/// Each call is a single attempt. Implementations must not retry.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Fetches every known user position, including the caller's own entry
    /// when a location was supplied.
    async fn fetch_all_users(
        &self,
        user_id: &str,
        location: Option<Coordinate>,
    ) -> RegistryResult<Vec<Coordinate>>;

    /// Fetches the distance from the caller to the nearest other user, in
    /// meters. `f64::INFINITY` when nobody else is registered.
    async fn fetch_nearest_distance(
        &self,
        user_id: &str,
        location: Option<Coordinate>,
    ) -> RegistryResult<f64>;
}
