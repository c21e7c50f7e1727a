//! Mock Registry
//!
//! In-memory registry client for testing the sync engine without a server.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::error::{RegistryError, RegistryResult};
use super::RegistryClient;
use crate::geo::Coordinate;

/// A request observed by the mock.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryCall {
    /// `fetch_all_users` was called.
    AllUsers {
        user_id: String,
        location: Option<Coordinate>,
    },
    /// `fetch_nearest_distance` was called.
    NearestDistance {
        user_id: String,
        location: Option<Coordinate>,
    },
}

#[derive(Debug, Default)]
struct MockState {
    all_users: Vec<Coordinate>,
    nearest_meters: Option<f64>,
    queued_all_users: VecDeque<RegistryResult<Vec<Coordinate>>>,
    queued_nearest: VecDeque<RegistryResult<f64>>,
    injected_error: Option<RegistryError>,
    delay: Option<Duration>,
    calls: Vec<RegistryCall>,
}

/// Mock registry client.
///
/// Answers with a sticky response unless a one-shot response was queued or
/// an error injected. Every call is recorded.
#[derive(Debug, Default)]
pub struct MockRegistry {
    state: Mutex<MockState>,
}

impl MockRegistry {
    /// Creates a mock with no users and no nearest distance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sticky "all users" response.
    pub fn set_all_users(&self, users: Vec<Coordinate>) {
        self.with_state(|s| s.all_users = users);
    }

    /// Sets the sticky nearest distance, in meters.
    pub fn set_nearest_distance(&self, meters: f64) {
        self.with_state(|s| s.nearest_meters = Some(meters));
    }

    /// Queues a one-shot "all users" response.
    pub fn queue_all_users(&self, result: RegistryResult<Vec<Coordinate>>) {
        self.with_state(|s| s.queued_all_users.push_back(result));
    }

    /// Queues a one-shot nearest-distance response.
    pub fn queue_nearest_distance(&self, result: RegistryResult<f64>) {
        self.with_state(|s| s.queued_nearest.push_back(result));
    }

    /// Makes the next call of either kind fail with `error`.
    pub fn inject_error(&self, error: RegistryError) {
        self.with_state(|s| s.injected_error = Some(error));
    }

    /// Delays every response by `delay` (observed on tokio's clock).
    pub fn set_delay(&self, delay: Duration) {
        self.with_state(|s| s.delay = Some(delay));
    }

    /// Returns every call made so far.
    pub fn calls(&self) -> Vec<RegistryCall> {
        self.with_state(|s| s.calls.clone())
    }

    /// Returns the number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.with_state(|s| s.calls.len())
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut MockState) -> R) -> R {
        let mut guard = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }

    async fn pause(&self) {
        if let Some(delay) = self.with_state(|s| s.delay) {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl RegistryClient for MockRegistry {
    async fn fetch_all_users(
        &self,
        user_id: &str,
        location: Option<Coordinate>,
    ) -> RegistryResult<Vec<Coordinate>> {
        let result = self.with_state(|s| {
            s.calls.push(RegistryCall::AllUsers {
                user_id: user_id.to_string(),
                location,
            });
            if let Some(err) = s.injected_error.take() {
                return Err(err);
            }
            s.queued_all_users
                .pop_front()
                .unwrap_or_else(|| Ok(s.all_users.clone()))
        });
        self.pause().await;
        result
    }

    async fn fetch_nearest_distance(
        &self,
        user_id: &str,
        location: Option<Coordinate>,
    ) -> RegistryResult<f64> {
        let result = self.with_state(|s| {
            s.calls.push(RegistryCall::NearestDistance {
                user_id: user_id.to_string(),
                location,
            });
            if let Some(err) = s.injected_error.take() {
                return Err(err);
            }
            s.queued_nearest
                .pop_front()
                .unwrap_or(Ok(s.nearest_meters.unwrap_or(f64::INFINITY)))
        });
        self.pause().await;
        result
    }
}
