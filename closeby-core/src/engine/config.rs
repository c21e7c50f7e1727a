//! Engine configuration

use std::time::Duration;

use crate::alert::{DEFAULT_NOTIFICATION_ID, DEFAULT_NOTIFICATION_TITLE};
use crate::lifecycle::AppState;
use crate::proximity::ProximityThresholds;

/// Default sync period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Configuration for the sync engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Fixed period between sync cycles
    pub poll_interval: Duration,

    /// Classification and alert thresholds
    pub thresholds: ProximityThresholds,

    /// Platform id reused for every proximity notification
    pub notification_id: String,

    /// Title of the proximity notification
    pub notification_title: String,

    /// Lifecycle state reported by the platform at startup
    pub initial_state: AppState,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            thresholds: ProximityThresholds::default(),
            notification_id: DEFAULT_NOTIFICATION_ID.to_string(),
            notification_title: DEFAULT_NOTIFICATION_TITLE.to_string(),
            initial_state: AppState::Foreground,
        }
    }
}

impl EngineConfig {
    /// Sets the sync period.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the thresholds.
    pub fn with_thresholds(mut self, thresholds: ProximityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Sets the lifecycle state at startup.
    pub fn with_initial_state(mut self, state: AppState) -> Self {
        self.initial_state = state;
        self
    }
}
