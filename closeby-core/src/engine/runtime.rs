// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Engine Runtime
//!
//! Runs a [`SyncEngine`] as a single-consumer actor on tokio. Every input
//! is a message processed one at a time against the owned engine:
//!
//! - timer ticks at the configured poll interval
//! - location fixes and errors from the [`LocationProvider`]
//! - lifecycle signals from the platform
//! - completed registry calls
//!
//! Registry calls run on a spawned task so the inbox keeps draining while a
//! call is pending. The engine's busy flag makes overlapping ticks no-ops.
//! A call whose task panics completes as a network failure.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::error::{EngineError, EngineResult};
use super::state::SessionState;
use super::sync_engine::{SyncEngine, SyncRequest, SyncResponse};
use crate::geo::Coordinate;
use crate::lifecycle::LifecycleSignal;
use crate::registry::{RegistryClient, RegistryError};

/// Shortest accepted poll period; `interval` panics on zero.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Messages accepted by the engine actor.
#[derive(Debug)]
enum EngineCommand {
    Location(Coordinate),
    LocationError(String),
    Lifecycle(LifecycleSignal),
    Shutdown,
}

/// Delivery end handed to a [`LocationProvider`].
#[derive(Debug, Clone)]
pub struct LocationSink {
    tx: mpsc::UnboundedSender<EngineCommand>,
}

impl LocationSink {
    /// Delivers a location fix. Returns false once the engine has stopped.
    pub fn deliver(&self, location: Coordinate) -> bool {
        self.tx.send(EngineCommand::Location(location)).is_ok()
    }

    /// Reports a location error. Returns false once the engine has stopped.
    pub fn error(&self, message: impl Into<String>) -> bool {
        self.tx
            .send(EngineCommand::LocationError(message.into()))
            .is_ok()
    }
}

/// Platform location service.
///
/// The engine subscribes once at startup, with both a one-shot request and
/// a continuous watch. Providers push fixes into the given sink whenever
/// they arrive.
pub trait LocationProvider: Send + Sync {
    /// Requests a single current position.
    fn current_position(&self, sink: LocationSink);

    /// Starts continuous position updates.
    fn watch_position(&self, sink: LocationSink);
}

/// Location provider that never reports anything. Fixes can still be
/// pushed through [`EngineHandle::update_location`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLocationProvider;

impl LocationProvider for NoLocationProvider {
    fn current_position(&self, _sink: LocationSink) {}

    fn watch_position(&self, _sink: LocationSink) {}
}

/// Handle to a running engine actor.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    tx: mpsc::UnboundedSender<EngineCommand>,
    state: watch::Receiver<SessionState>,
}

impl EngineHandle {
    /// Returns a sink for location fixes.
    pub fn location_sink(&self) -> LocationSink {
        LocationSink {
            tx: self.tx.clone(),
        }
    }

    /// Pushes a location fix.
    pub fn update_location(&self, location: Coordinate) -> EngineResult<()> {
        self.send(EngineCommand::Location(location))
    }

    /// Reports a location provider error.
    pub fn location_error(&self, message: impl Into<String>) -> EngineResult<()> {
        self.send(EngineCommand::LocationError(message.into()))
    }

    /// Delivers a lifecycle signal.
    pub fn lifecycle(&self, signal: LifecycleSignal) -> EngineResult<()> {
        self.send(EngineCommand::Lifecycle(signal))
    }

    /// Delivers a platform app-state string (`"active"`, `"background"`, ..).
    pub fn app_state_changed(&self, state: &str) -> EngineResult<()> {
        self.lifecycle(LifecycleSignal::from_platform(state))
    }

    /// Latest published session state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Subscribes to session state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    /// Asks the engine to stop after the current message.
    pub fn shutdown(&self) -> EngineResult<()> {
        self.send(EngineCommand::Shutdown)
    }

    /// Returns true while the actor is running.
    pub fn is_running(&self) -> bool {
        !self.tx.is_closed()
    }

    fn send(&self, command: EngineCommand) -> EngineResult<()> {
        self.tx.send(command).map_err(|_| EngineError::Stopped)
    }
}

/// Spawns the engine actor on the current tokio runtime.
///
/// Subscribes `location` before the first tick, which fires immediately.
pub fn spawn(
    engine: SyncEngine,
    registry: Arc<dyn RegistryClient>,
    location: &dyn LocationProvider,
) -> (EngineHandle, JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(engine.state().clone());

    let handle = EngineHandle {
        tx,
        state: state_rx,
    };

    location.current_position(handle.location_sink());
    location.watch_position(handle.location_sink());

    let task = tokio::spawn(run(engine, registry, rx, state_tx));
    (handle, task)
}

async fn run(
    mut engine: SyncEngine,
    registry: Arc<dyn RegistryClient>,
    mut inbox: mpsc::UnboundedReceiver<EngineCommand>,
    state_tx: watch::Sender<SessionState>,
) {
    let mut ticker = tokio::time::interval(engine.config().poll_interval.max(MIN_POLL_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut calls: JoinSet<SyncResponse> = JoinSet::new();
    let mut pending: Option<SyncRequest> = None;

    info!(user_id = engine.state().self_id(), "sync engine started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Ok(request) = engine.begin_sync() {
                    let registry = registry.clone();
                    let call = request.clone();
                    calls.spawn(async move { call.execute(registry.as_ref()).await });
                    pending = Some(request);
                }
            }
            Some(joined) = calls.join_next(), if !calls.is_empty() => {
                if let Some(request) = pending.take() {
                    let response = joined.unwrap_or_else(|e| {
                        warn!(id = request.id, error = %e, "registry call aborted");
                        SyncResponse::failed(
                            request.mode,
                            RegistryError::Network(format!("registry call aborted: {}", e)),
                        )
                    });
                    // Failures are already recorded in the session state.
                    let _ = engine.complete_sync(request, response);
                }
            }
            command = inbox.recv() => match command {
                Some(EngineCommand::Location(location)) => engine.update_location(location),
                Some(EngineCommand::LocationError(message)) => engine.location_error(&message),
                Some(EngineCommand::Lifecycle(signal)) => {
                    engine.apply_lifecycle(signal);
                }
                Some(EngineCommand::Shutdown) | None => break,
            },
        }

        state_tx.send_if_modified(|current| {
            if current != engine.state() {
                *current = engine.state().clone();
                true
            } else {
                false
            }
        });
    }

    debug!("sync engine stopped");
}
