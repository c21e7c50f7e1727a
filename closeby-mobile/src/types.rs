//! Mobile-friendly data types.
//!
//! These types are wrappers around closeby-core types that are compatible
//! with UniFFI for cross-language bindings.

use std::time::Duration;

use closeby_core::engine::{MarkerKind, PeerSample};
use closeby_core::registry::RegistryConfig;
use closeby_core::{
    AppState, EngineConfig, ProximityLevel, ProximityThresholds, SessionState, StatusIndicator,
    DEFAULT_POLL_INTERVAL, DISPLAY_CUTOFF_METERS, NEAR_MISS_THRESHOLD_METERS,
    OVERLAP_THRESHOLD_METERS,
};

/// Mobile-friendly proximity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum MobileProximityLevel {
    Critical,
    Warning,
    Safe,
    Unknown,
}

impl From<ProximityLevel> for MobileProximityLevel {
    fn from(level: ProximityLevel) -> Self {
        match level {
            ProximityLevel::Critical => MobileProximityLevel::Critical,
            ProximityLevel::Warning => MobileProximityLevel::Warning,
            ProximityLevel::Safe => MobileProximityLevel::Safe,
            ProximityLevel::Unknown => MobileProximityLevel::Unknown,
        }
    }
}

/// How a peer pin should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum MobileMarkerKind {
    SelfMarker,
    Overlapping,
    Clear,
}

impl From<MarkerKind> for MobileMarkerKind {
    fn from(kind: MarkerKind) -> Self {
        match kind {
            MarkerKind::SelfMarker => MobileMarkerKind::SelfMarker,
            MarkerKind::Overlapping => MobileMarkerKind::Overlapping,
            MarkerKind::Clear => MobileMarkerKind::Clear,
        }
    }
}

/// One user on the map.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct MobilePeer {
    pub latitude: f64,
    pub longitude: f64,
    /// Distance to the closest other user, whole meters.
    pub nearest_distance_meters: Option<f64>,
    pub is_self: bool,
    pub marker: MobileMarkerKind,
}

impl MobilePeer {
    fn from_sample(sample: &PeerSample, thresholds: &ProximityThresholds) -> Self {
        MobilePeer {
            latitude: sample.coordinate.latitude,
            longitude: sample.coordinate.longitude,
            nearest_distance_meters: sample.nearest_distance_meters,
            is_self: sample.is_self,
            marker: sample.marker_kind(thresholds).into(),
        }
    }
}

/// Footer indicator.
#[derive(Debug, Clone, PartialEq, uniffi::Enum)]
pub enum MobileStatusIndicator {
    /// No location fix yet.
    LocationUnknown,
    /// Nearest user within the display cutoff.
    NearestUser {
        distance_meters: f64,
        level: MobileProximityLevel,
    },
    /// The last sync failed.
    ConnectionError,
}

impl From<StatusIndicator> for MobileStatusIndicator {
    fn from(indicator: StatusIndicator) -> Self {
        match indicator {
            StatusIndicator::LocationUnknown => MobileStatusIndicator::LocationUnknown,
            StatusIndicator::NearestUser {
                distance_meters,
                level,
            } => MobileStatusIndicator::NearestUser {
                distance_meters,
                level: level.into(),
            },
            StatusIndicator::ConnectionError => MobileStatusIndicator::ConnectionError,
        }
    }
}

/// Read-only view of the engine's session state.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct MobileSessionSnapshot {
    pub user_id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub peers: Vec<MobilePeer>,
    pub nearest_distance_meters: Option<f64>,
    pub level: MobileProximityLevel,
    pub is_overlapping: bool,
    pub last_sync_failed: bool,
    pub is_foreground: bool,
}

impl MobileSessionSnapshot {
    /// Converts a core session state under the given thresholds.
    pub fn from_state(state: &SessionState, thresholds: &ProximityThresholds) -> Self {
        let location = state.self_location();
        MobileSessionSnapshot {
            user_id: state.self_id().to_string(),
            latitude: location.map(|c| c.latitude),
            longitude: location.map(|c| c.longitude),
            peers: state
                .peers()
                .iter()
                .map(|p| MobilePeer::from_sample(p, thresholds))
                .collect(),
            nearest_distance_meters: state.nearest_distance_meters(),
            level: state.proximity_level(thresholds).into(),
            is_overlapping: state.is_overlapping(),
            last_sync_failed: state.last_sync_failed(),
            is_foreground: state.is_foreground(),
        }
    }
}

/// Engine configuration passed from the platform.
#[derive(Debug, Clone, uniffi::Record)]
pub struct MobileEngineConfig {
    /// Peer registry base URL
    pub registry_url: String,
    /// Fixed user id; a fresh one is generated when absent
    pub user_id: Option<String>,
    /// Sync period in milliseconds
    pub poll_interval_ms: u64,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Optional SOCKS5 proxy URL (e.g., for Tor)
    pub proxy_url: Option<String>,
    pub overlap_meters: f64,
    pub near_miss_meters: f64,
    pub display_cutoff_meters: f64,
    /// Lifecycle state at startup
    pub start_in_foreground: bool,
}

/// Registry URL and timeout honour `CLOSEBY_REGISTRY_URL` and
/// `CLOSEBY_REGISTRY_TIMEOUT_MS`.
impl Default for MobileEngineConfig {
    fn default() -> Self {
        let registry = RegistryConfig::from_env();
        Self {
            registry_url: registry.base_url,
            user_id: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            timeout_ms: registry.timeout.as_millis() as u64,
            proxy_url: None,
            overlap_meters: OVERLAP_THRESHOLD_METERS,
            near_miss_meters: NEAR_MISS_THRESHOLD_METERS,
            display_cutoff_meters: DISPLAY_CUTOFF_METERS,
            start_in_foreground: true,
        }
    }
}

impl MobileEngineConfig {
    pub fn thresholds(&self) -> ProximityThresholds {
        ProximityThresholds {
            overlap_meters: self.overlap_meters,
            near_miss_meters: self.near_miss_meters,
            display_cutoff_meters: self.display_cutoff_meters,
        }
    }

    pub fn to_core_config(&self) -> EngineConfig {
        let initial = if self.start_in_foreground {
            AppState::Foreground
        } else {
            AppState::Background
        };
        EngineConfig::default()
            .with_poll_interval(Duration::from_millis(self.poll_interval_ms))
            .with_thresholds(self.thresholds())
            .with_initial_state(initial)
    }
}
