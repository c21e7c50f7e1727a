//! Event System
//!
//! Callbacks for engine events.

use std::sync::Arc;

use super::state::SessionState;
use crate::alert::Notification;
use crate::lifecycle::AppState;

/// Which registry endpoint a sync cycle used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Foreground: fetch every user position.
    AllUsers,
    /// Background: fetch the distance to the nearest user.
    NearestDistance,
}

/// Events emitted by the sync engine.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// Session state changed.
    StateChanged {
        /// The new state.
        state: SessionState,
    },

    /// A sync cycle succeeded.
    SyncSucceeded {
        /// Endpoint used.
        mode: SyncMode,
    },

    /// A sync cycle failed.
    SyncFailed {
        /// Error description.
        error: String,
    },

    /// A timer tick was skipped because a sync was still in flight.
    SyncSkipped,

    /// A proximity notification was emitted.
    NotificationEmitted {
        /// The notification.
        notification: Notification,
    },

    /// The app moved between foreground and background.
    LifecycleChanged {
        /// The new state.
        state: AppState,
    },

    /// The location provider reported an error.
    LocationError {
        /// Error description.
        message: String,
    },
}

/// Event handler trait.
///
/// Implement this trait to receive engine events.
pub trait EventHandler: Send + Sync {
    /// Called when an event occurs.
    fn on_event(&self, event: EngineEvent);
}

/// Simple callback-based event handler.
///
/// Wraps a closure for easy event handling.
pub struct CallbackHandler<F>
where
    F: Fn(EngineEvent) + Send + Sync,
{
    callback: F,
}

impl<F> CallbackHandler<F>
where
    F: Fn(EngineEvent) + Send + Sync,
{
    /// Creates a new callback handler.
    pub fn new(callback: F) -> Self {
        CallbackHandler { callback }
    }
}

impl<F> EventHandler for CallbackHandler<F>
where
    F: Fn(EngineEvent) + Send + Sync,
{
    fn on_event(&self, event: EngineEvent) {
        (self.callback)(event);
    }
}

/// Event dispatcher for managing multiple handlers.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    /// Creates a new event dispatcher.
    pub fn new() -> Self {
        EventDispatcher {
            handlers: Vec::new(),
        }
    }

    /// Adds an event handler.
    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    /// Dispatches an event to all handlers.
    pub fn dispatch(&self, event: EngineEvent) {
        for handler in &self.handlers {
            handler.on_event(event.clone());
        }
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
