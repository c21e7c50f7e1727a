//! Closeby Mobile Bindings
//!
//! UniFFI bindings for Android and iOS platforms.
//! Exposes the proximity engine on top of closeby-core. The platform
//! supplies location, notifications and a state observer as callback
//! interfaces; the engine actor runs on a tokio runtime owned by
//! [`ProximityMobile`].

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;
use tracing::info;

use closeby_core::{
    distance_meters, spawn, Coordinate, EngineHandle, EventDispatcher, HttpRegistryClient,
    LifecycleSignal, ProximityThresholds, RegistryClient, RegistryConfig, SyncEngine,
};

// === Modules ===

mod callbacks;
mod error;
mod types;

// Re-export public types
pub use callbacks::{PlatformLocationProvider, PlatformNotificationHandler, PlatformStateObserver};
pub use error::MobileError;
pub use types::{
    MobileEngineConfig, MobileMarkerKind, MobilePeer, MobileProximityLevel, MobileSessionSnapshot,
    MobileStatusIndicator,
};

use callbacks::{PlatformLocationBridge, PlatformNotificationBridge, PlatformObserverBridge};

uniffi::setup_scaffolding!();

// === Standalone Functions ===

/// Great-circle distance between two positions, in meters.
#[uniffi::export]
pub fn distance_between(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    distance_meters(Coordinate::new(lat1, lon1), Coordinate::new(lat2, lon2))
}

/// Classifies a distance with the default thresholds.
#[uniffi::export]
pub fn classify_distance(distance_meters: Option<f64>) -> MobileProximityLevel {
    closeby_core::classify(distance_meters).into()
}

/// Default engine configuration, for platforms to tweak.
#[uniffi::export]
pub fn default_engine_config() -> MobileEngineConfig {
    MobileEngineConfig::default()
}

// === Main Object ===

/// Running proximity engine.
#[derive(uniffi::Object)]
pub struct ProximityMobile {
    handle: EngineHandle,
    thresholds: ProximityThresholds,
    // Hosts the engine actor. Shut down without blocking on drop.
    runtime: Option<Runtime>,
}

#[uniffi::export]
impl ProximityMobile {
    /// Starts the engine against the configured registry.
    ///
    /// The first sync runs immediately.
    #[uniffi::constructor]
    pub fn new(
        config: MobileEngineConfig,
        location: Box<dyn PlatformLocationProvider>,
        notifications: Box<dyn PlatformNotificationHandler>,
        observer: Box<dyn PlatformStateObserver>,
    ) -> Result<Arc<Self>, MobileError> {
        let mut registry_config = RegistryConfig::new(config.registry_url.clone())
            .with_timeout(Duration::from_millis(config.timeout_ms));
        if let Some(proxy) = &config.proxy_url {
            registry_config = registry_config.with_proxy(proxy.clone());
        }
        let registry = HttpRegistryClient::new(&registry_config)?;

        Self::start(
            config,
            Arc::new(registry),
            Arc::from(location),
            Arc::from(notifications),
            Arc::from(observer),
        )
    }

    /// Delivers a location fix from the platform.
    pub fn on_location(&self, latitude: f64, longitude: f64) -> Result<(), MobileError> {
        let location = Coordinate::new(latitude, longitude);
        if !location.is_finite() {
            return Err(MobileError::InvalidInput(format!(
                "non-finite location: {}, {}",
                latitude, longitude
            )));
        }
        Ok(self.handle.update_location(location)?)
    }

    /// Reports a location provider failure. Not fatal.
    pub fn on_location_error(&self, message: String) -> Result<(), MobileError> {
        Ok(self.handle.location_error(message)?)
    }

    /// Delivers a platform app state (`"active"`, `"background"`, ...).
    pub fn on_app_state_change(&self, state: String) -> Result<(), MobileError> {
        Ok(self.handle.lifecycle(LifecycleSignal::from_platform(&state))?)
    }

    /// Latest published session state.
    pub fn snapshot(&self) -> MobileSessionSnapshot {
        MobileSessionSnapshot::from_state(&self.handle.state(), &self.thresholds)
    }

    /// Footer indicators for the latest session state.
    pub fn status_indicators(&self) -> Vec<MobileStatusIndicator> {
        self.handle
            .state()
            .status_indicators(&self.thresholds)
            .into_iter()
            .map(MobileStatusIndicator::from)
            .collect()
    }

    /// The id this device reports to the registry.
    pub fn user_id(&self) -> String {
        self.handle.state().self_id().to_string()
    }

    /// Whether the engine is still running.
    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    /// Stops the engine. Idempotent.
    pub fn stop(&self) {
        if self.handle.shutdown().is_ok() {
            info!("proximity engine stopping");
        }
    }
}

impl ProximityMobile {
    fn start(
        config: MobileEngineConfig,
        registry: Arc<dyn RegistryClient>,
        location: Arc<dyn PlatformLocationProvider>,
        notifications: Arc<dyn PlatformNotificationHandler>,
        observer: Arc<dyn PlatformStateObserver>,
    ) -> Result<Arc<Self>, MobileError> {
        if config.poll_interval_ms == 0 {
            return Err(MobileError::InvalidInput(
                "poll interval must be positive".to_string(),
            ));
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("closeby-engine")
            .enable_all()
            .build()
            .map_err(|e| MobileError::Internal(e.to_string()))?;

        let thresholds = config.thresholds();
        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_handler(Arc::new(PlatformObserverBridge::new(observer, thresholds)));

        let notifier = Arc::new(PlatformNotificationBridge::new(notifications));
        let engine_config = config.to_core_config();
        let engine = match config.user_id {
            Some(id) => SyncEngine::with_user_id(id, engine_config, notifier, Arc::new(dispatcher)),
            None => SyncEngine::new(engine_config, notifier, Arc::new(dispatcher)),
        };

        let (handle, _task) = {
            let _guard = runtime.enter();
            spawn(engine, registry, &PlatformLocationBridge::new(location))
        };

        Ok(Arc::new(ProximityMobile {
            handle,
            thresholds,
            runtime: Some(runtime),
        }))
    }
}

impl Drop for ProximityMobile {
    fn drop(&mut self) {
        let _ = self.handle.shutdown();
        // The last reference may go away on a runtime worker, where a
        // blocking runtime drop panics.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
