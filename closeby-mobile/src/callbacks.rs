// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Platform Callback Interfaces
//!
//! The engine's collaborators, implemented in Swift (iOS) or Kotlin
//! (Android). Each interface is wrapped in an adapter that implements the
//! matching closeby-core seam.

use std::sync::Arc;

use closeby_core::{
    EngineEvent, EventHandler, LocationProvider, LocationSink, Notification, NotificationSink,
    ProximityThresholds,
};

use crate::types::MobileSessionSnapshot;

/// Platform location service.
///
/// Fixes are pushed back through `ProximityMobile::on_location`, errors
/// through `ProximityMobile::on_location_error`.
#[uniffi::export(callback_interface)]
pub trait PlatformLocationProvider: Send + Sync {
    /// Request a single current position.
    fn request_current_position(&self);

    /// Start continuous position updates.
    fn start_watching(&self);
}

/// Platform local notifications.
#[uniffi::export(callback_interface)]
pub trait PlatformNotificationHandler: Send + Sync {
    /// Show (or replace, for an existing id) a notification.
    fn show(&self, id: String, title: String, body: String);

    /// Remove every pending and delivered notification.
    fn clear_all(&self);
}

/// Receives session updates for the view layer.
#[uniffi::export(callback_interface)]
pub trait PlatformStateObserver: Send + Sync {
    /// Called whenever the session state changes.
    fn on_state_changed(&self, snapshot: MobileSessionSnapshot);

    /// Called when a sync cycle fails.
    fn on_sync_error(&self, error: String);
}

/// Location provider that delegates to the platform.
pub struct PlatformLocationBridge {
    provider: Arc<dyn PlatformLocationProvider>,
}

impl PlatformLocationBridge {
    pub fn new(provider: Arc<dyn PlatformLocationProvider>) -> Self {
        PlatformLocationBridge { provider }
    }
}

impl LocationProvider for PlatformLocationBridge {
    // The sink is unused: the platform answers through the mobile object.
    fn current_position(&self, _sink: LocationSink) {
        self.provider.request_current_position();
    }

    fn watch_position(&self, _sink: LocationSink) {
        self.provider.start_watching();
    }
}

/// Notification sink that delegates to the platform.
pub struct PlatformNotificationBridge {
    handler: Arc<dyn PlatformNotificationHandler>,
}

impl PlatformNotificationBridge {
    pub fn new(handler: Arc<dyn PlatformNotificationHandler>) -> Self {
        PlatformNotificationBridge { handler }
    }
}

impl NotificationSink for PlatformNotificationBridge {
    fn emit(&self, notification: Notification) {
        self.handler
            .show(notification.id, notification.title, notification.body);
    }

    fn clear_all(&self) {
        self.handler.clear_all();
    }
}

/// Event handler forwarding state changes and sync failures.
pub struct PlatformObserverBridge {
    observer: Arc<dyn PlatformStateObserver>,
    thresholds: ProximityThresholds,
}

impl PlatformObserverBridge {
    pub fn new(observer: Arc<dyn PlatformStateObserver>, thresholds: ProximityThresholds) -> Self {
        PlatformObserverBridge {
            observer,
            thresholds,
        }
    }
}

impl EventHandler for PlatformObserverBridge {
    fn on_event(&self, event: EngineEvent) {
        match event {
            EngineEvent::StateChanged { state } => {
                self.observer
                    .on_state_changed(MobileSessionSnapshot::from_state(&state, &self.thresholds));
            }
            EngineEvent::SyncFailed { error } => self.observer.on_sync_error(error),
            _ => {}
        }
    }
}
