//! Closeby Core Library
//!
//! Proximity synchronization engine for a nearby-users map.
//! Reconciles the local position with a remote peer registry on a fixed
//! timer, classifies the distance to the nearest user and decides when a
//! proximity alert must reach the user.

pub mod alert;
pub mod engine;
pub mod geo;
pub mod lifecycle;
pub mod proximity;
pub mod registry;

pub use alert::{AlertDecision, AlertPolicy, MockNotificationSink, Notification, NotificationSink};
pub use engine::{
    spawn, EngineConfig, EngineError, EngineEvent, EngineHandle, EventDispatcher, EventHandler,
    LocationProvider, LocationSink, SessionState, StatusIndicator, SyncEngine,
    DEFAULT_POLL_INTERVAL,
};
pub use geo::{distance_meters, nearest_distance, Coordinate};
pub use lifecycle::{AppState, LifecycleSignal, LifecycleTracker, LifecycleTransition};
pub use proximity::{
    classify, ProximityLevel, ProximityThresholds, DISPLAY_CUTOFF_METERS,
    NEAR_MISS_THRESHOLD_METERS, OVERLAP_THRESHOLD_METERS,
};
#[cfg(feature = "reqwest")]
pub use registry::HttpRegistryClient;
pub use registry::{MockRegistry, RegistryClient, RegistryConfig, RegistryError};
