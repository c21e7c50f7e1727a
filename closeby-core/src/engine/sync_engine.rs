// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync Engine
//!
//! The reconciliation state machine. A sync cycle is split in two halves so
//! the network call can run elsewhere while location and lifecycle events
//! keep landing:
//!
//! 1. [`SyncEngine::begin_sync`] picks the endpoint from the lifecycle state,
//!    snapshots the request parameters and marks the engine busy.
//! 2. [`SyncEngine::complete_sync`] applies the response atomically: all
//!    derived fields for one response are written before returning.
//!
//! At most one request is in flight. A tick arriving while busy is skipped.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::config::EngineConfig;
use super::error::{EngineError, EngineResult};
use super::events::{EngineEvent, EventDispatcher, SyncMode};
use super::state::{PeerSample, SessionState};
use crate::alert::{AlertPolicy, Notification, NotificationSink};
use crate::geo::{finite, nearest_distance, nearest_excluding, round_meters, Coordinate};
use crate::lifecycle::{LifecycleSignal, LifecycleTracker, LifecycleTransition};
use crate::registry::{RegistryClient, RegistryError, RegistryResult};

/// Parameters of one registry call, captured when the cycle starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncRequest {
    /// Monotonic request number.
    pub id: u64,
    /// Endpoint to call.
    pub mode: SyncMode,
    /// Caller id sent to the registry.
    pub user_id: String,
    /// Location sent to the registry.
    pub location: Option<Coordinate>,
}

impl SyncRequest {
    /// Performs the registry call for this request.
    pub async fn execute(&self, registry: &dyn RegistryClient) -> SyncResponse {
        match self.mode {
            SyncMode::AllUsers => SyncResponse::AllUsers(
                registry
                    .fetch_all_users(&self.user_id, self.location)
                    .await,
            ),
            SyncMode::NearestDistance => SyncResponse::NearestDistance(
                registry
                    .fetch_nearest_distance(&self.user_id, self.location)
                    .await,
            ),
        }
    }
}

/// Raw registry result for a [`SyncRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum SyncResponse {
    /// Result of `fetch_all_users`.
    AllUsers(RegistryResult<Vec<Coordinate>>),
    /// Result of `fetch_nearest_distance`, meters.
    NearestDistance(RegistryResult<f64>),
}

impl SyncResponse {
    /// A failed response for the given endpoint.
    pub fn failed(mode: SyncMode, error: RegistryError) -> Self {
        match mode {
            SyncMode::AllUsers => SyncResponse::AllUsers(Err(error)),
            SyncMode::NearestDistance => SyncResponse::NearestDistance(Err(error)),
        }
    }
}

/// What a successful cycle changed.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// The peer list was replaced.
    PeersRefreshed {
        peers: usize,
        nearest_distance_meters: Option<f64>,
    },
    /// Only the nearest distance was refreshed.
    DistanceUpdated {
        nearest_distance_meters: Option<f64>,
        notified: bool,
    },
}

/// Proximity synchronization state machine.
pub struct SyncEngine {
    state: SessionState,
    lifecycle: LifecycleTracker,
    policy: AlertPolicy,
    config: EngineConfig,
    notifier: Arc<dyn NotificationSink>,
    events: Arc<EventDispatcher>,
    in_flight: Option<u64>,
    next_request_id: u64,
}

impl SyncEngine {
    /// Creates an engine with a freshly generated user id.
    pub fn new(
        config: EngineConfig,
        notifier: Arc<dyn NotificationSink>,
        events: Arc<EventDispatcher>,
    ) -> Self {
        Self::with_user_id(Uuid::new_v4().to_string(), config, notifier, events)
    }

    /// Creates an engine with a fixed user id.
    pub fn with_user_id(
        user_id: impl Into<String>,
        config: EngineConfig,
        notifier: Arc<dyn NotificationSink>,
        events: Arc<EventDispatcher>,
    ) -> Self {
        let lifecycle = LifecycleTracker::new(config.initial_state);
        SyncEngine {
            state: SessionState::new(user_id, lifecycle.is_foreground()),
            lifecycle,
            policy: AlertPolicy::new(config.thresholds),
            config,
            notifier,
            events,
            in_flight: None,
            next_request_id: 1,
        }
    }

    /// Current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns true while a registry call is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Applies a location fix. Does not trigger a sync.
    pub fn update_location(&mut self, location: Coordinate) {
        if !location.is_finite() {
            warn!(?location, "ignoring non-finite location fix");
            return;
        }
        self.state.set_location(location);
        self.publish_state();
    }

    /// Records a location provider error. Not fatal.
    pub fn location_error(&self, message: &str) {
        warn!(%message, "location provider error");
        self.events.dispatch(EngineEvent::LocationError {
            message: message.to_string(),
        });
    }

    /// Applies a lifecycle signal.
    ///
    /// Returning to the foreground clears every outstanding notification,
    /// whatever the current distance.
    pub fn apply_lifecycle(&mut self, signal: LifecycleSignal) -> Option<LifecycleTransition> {
        let transition = self.lifecycle.apply(signal)?;

        if transition == LifecycleTransition::EnteredForeground {
            self.notifier.clear_all();
        }
        self.state.set_foreground(self.lifecycle.is_foreground());

        info!(state = ?self.lifecycle.state(), "app lifecycle changed");
        self.events.dispatch(EngineEvent::LifecycleChanged {
            state: self.lifecycle.state(),
        });
        self.publish_state();

        Some(transition)
    }

    /// Starts a sync cycle.
    ///
    /// Fails with `SyncInFlight` while busy and with `NoLocation` when
    /// backgrounded without a fix. Neither marks the session as failed.
    pub fn begin_sync(&mut self) -> EngineResult<SyncRequest> {
        if self.in_flight.is_some() {
            debug!("sync still in flight, skipping tick");
            self.events.dispatch(EngineEvent::SyncSkipped);
            return Err(EngineError::SyncInFlight);
        }

        let location = self.state.self_location();
        let mode = if self.lifecycle.is_foreground() {
            SyncMode::AllUsers
        } else if location.is_some() {
            SyncMode::NearestDistance
        } else {
            debug!("background sync without location, skipping");
            return Err(EngineError::NoLocation);
        };

        let request = SyncRequest {
            id: self.next_request_id,
            mode,
            user_id: self.state.self_id().to_string(),
            location,
        };
        self.next_request_id += 1;
        self.in_flight = Some(request.id);

        debug!(id = request.id, ?mode, "sync started");
        Ok(request)
    }

    /// Applies the response of the in-flight request.
    ///
    /// On failure the previous derived state is kept and only the failure
    /// flag is set.
    pub fn complete_sync(
        &mut self,
        request: SyncRequest,
        response: SyncResponse,
    ) -> EngineResult<SyncOutcome> {
        if self.in_flight != Some(request.id) {
            return Err(EngineError::StaleResponse(request.id));
        }
        self.in_flight = None;

        let result = match response {
            SyncResponse::AllUsers(Ok(points)) => Ok(self.apply_all_users(&request, points)),
            SyncResponse::NearestDistance(Ok(meters)) => Ok(self.apply_nearest_distance(meters)),
            SyncResponse::AllUsers(Err(e)) | SyncResponse::NearestDistance(Err(e)) => Err(e),
        };

        match result {
            Ok(outcome) => {
                self.state.set_sync_failed(false);
                self.events
                    .dispatch(EngineEvent::SyncSucceeded { mode: request.mode });
                self.publish_state();
                Ok(outcome)
            }
            Err(e) => {
                warn!(error = %e, mode = ?request.mode, "sync failed");
                self.state.set_sync_failed(true);
                self.events.dispatch(EngineEvent::SyncFailed {
                    error: e.to_string(),
                });
                self.publish_state();
                Err(EngineError::Registry(e))
            }
        }
    }

    /// Runs one full sync cycle inline.
    pub async fn sync(&mut self, registry: &dyn RegistryClient) -> EngineResult<SyncOutcome> {
        let request = self.begin_sync()?;
        let response = request.execute(registry).await;
        self.complete_sync(request, response)
    }

    fn apply_all_users(&mut self, request: &SyncRequest, points: Vec<Coordinate>) -> SyncOutcome {
        // Self is the entry equal to the location we sent with this request.
        let self_index = request
            .location
            .and_then(|location| points.iter().position(|p| *p == location));

        let peers: Vec<PeerSample> = points
            .iter()
            .enumerate()
            .map(|(i, coordinate)| PeerSample {
                coordinate: *coordinate,
                nearest_distance_meters: finite(round_meters(nearest_excluding(&points, i))),
                is_self: Some(i) == self_index,
            })
            .collect();

        let nearest = match (self_index, request.location) {
            (Some(i), _) => peers[i].nearest_distance_meters,
            (None, Some(location)) => finite(round_meters(nearest_distance(location, &points))),
            (None, None) => None,
        };

        let decision = self.policy.evaluate(
            self.state.is_overlapping(),
            nearest,
            self.lifecycle.is_foreground(),
        );

        let count = peers.len();
        self.state.set_peers(peers);
        self.state.set_proximity(nearest, decision.is_overlapping);
        if decision.notify {
            self.notify(nearest);
        }

        debug!(peers = count, ?nearest, "peers refreshed");
        SyncOutcome::PeersRefreshed {
            peers: count,
            nearest_distance_meters: nearest,
        }
    }

    fn apply_nearest_distance(&mut self, meters: f64) -> SyncOutcome {
        let nearest = finite(round_meters(meters));
        let decision = self.policy.evaluate(
            self.state.is_overlapping(),
            nearest,
            self.lifecycle.is_foreground(),
        );

        self.state.set_proximity(nearest, decision.is_overlapping);
        if decision.notify {
            self.notify(nearest);
        }

        debug!(?nearest, "nearest distance updated");
        SyncOutcome::DistanceUpdated {
            nearest_distance_meters: nearest,
            notified: decision.notify,
        }
    }

    fn notify(&self, distance_meters: Option<f64>) {
        let Some(distance) = distance_meters else {
            return;
        };
        let notification = Notification::too_close(
            &self.config.notification_id,
            &self.config.notification_title,
            distance,
        );
        info!(distance, "proximity alert");
        self.notifier.emit(notification.clone());
        self.events
            .dispatch(EngineEvent::NotificationEmitted { notification });
    }

    fn publish_state(&self) {
        self.events.dispatch(EngineEvent::StateChanged {
            state: self.state.clone(),
        });
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("state", &self.state)
            .field("lifecycle", &self.lifecycle)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}
