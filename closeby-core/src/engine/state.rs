// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Session State
//!
//! The single state record owned by the sync engine. Readers get clones;
//! only the engine mutates it.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::proximity::{ProximityLevel, ProximityThresholds};

/// One user's position as last reported by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerSample {
    /// Reported position.
    pub coordinate: Coordinate,
    /// Distance to the closest other returned entry, whole meters.
    pub nearest_distance_meters: Option<f64>,
    /// Whether this entry was recognised as the local user.
    pub is_self: bool,
}

/// How the view layer should mark a peer on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKind {
    /// The local user's own entry.
    SelfMarker,
    /// Another entry lies inside the overlap radius.
    Overlapping,
    /// Nobody inside the overlap radius.
    Clear,
}

impl PeerSample {
    /// Marker kind for this peer under the given thresholds.
    pub fn marker_kind(&self, thresholds: &ProximityThresholds) -> MarkerKind {
        if self.is_self {
            MarkerKind::SelfMarker
        } else if self
            .nearest_distance_meters
            .is_some_and(|d| thresholds.is_overlapping(d))
        {
            MarkerKind::Overlapping
        } else {
            MarkerKind::Clear
        }
    }
}

/// Persistent indicator surfaced by the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatusIndicator {
    /// No location fix yet.
    LocationUnknown,
    /// Nearest user readout, only within the display cutoff.
    NearestUser {
        distance_meters: f64,
        level: ProximityLevel,
    },
    /// The last sync cycle failed.
    ConnectionError,
}

/// Engine-owned session state.
///
/// `is_overlapping` always equals `nearest_distance_meters <= overlap`,
/// and is false while the distance is unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    self_id: String,
    self_location: Option<Coordinate>,
    peers: Vec<PeerSample>,
    nearest_distance_meters: Option<f64>,
    is_overlapping: bool,
    last_sync_failed: bool,
    is_foreground: bool,
}

impl SessionState {
    /// Creates an empty session for `self_id`.
    pub fn new(self_id: impl Into<String>, is_foreground: bool) -> Self {
        SessionState {
            self_id: self_id.into(),
            self_location: None,
            peers: Vec::new(),
            nearest_distance_meters: None,
            is_overlapping: false,
            last_sync_failed: false,
            is_foreground,
        }
    }

    /// The local user id.
    pub fn self_id(&self) -> &str {
        &self.self_id
    }

    /// Latest location fix, if any.
    pub fn self_location(&self) -> Option<Coordinate> {
        self.self_location
    }

    /// Peers from the last successful foreground sync.
    pub fn peers(&self) -> &[PeerSample] {
        &self.peers
    }

    /// Distance to the nearest other user, whole meters.
    pub fn nearest_distance_meters(&self) -> Option<f64> {
        self.nearest_distance_meters
    }

    /// Whether the nearest user is inside the overlap radius.
    pub fn is_overlapping(&self) -> bool {
        self.is_overlapping
    }

    /// Whether the last sync cycle failed.
    pub fn last_sync_failed(&self) -> bool {
        self.last_sync_failed
    }

    /// Whether the app is foregrounded.
    pub fn is_foreground(&self) -> bool {
        self.is_foreground
    }

    /// Risk band of the nearest distance.
    pub fn proximity_level(&self, thresholds: &ProximityThresholds) -> ProximityLevel {
        thresholds.classify(self.nearest_distance_meters)
    }

    /// Footer indicators, in display order.
    pub fn status_indicators(&self, thresholds: &ProximityThresholds) -> Vec<StatusIndicator> {
        let mut indicators = Vec::new();

        if self.self_location.is_none() {
            indicators.push(StatusIndicator::LocationUnknown);
        }

        if let Some(distance) = self
            .nearest_distance_meters
            .filter(|d| thresholds.is_displayable(*d))
        {
            indicators.push(StatusIndicator::NearestUser {
                distance_meters: distance,
                level: thresholds.classify(Some(distance)),
            });
        }

        if self.last_sync_failed {
            indicators.push(StatusIndicator::ConnectionError);
        }

        indicators
    }

    pub(crate) fn set_location(&mut self, location: Coordinate) {
        self.self_location = Some(location);
    }

    pub(crate) fn set_peers(&mut self, peers: Vec<PeerSample>) {
        self.peers = peers;
    }

    /// Stores the distance and the overlap flag together.
    pub(crate) fn set_proximity(&mut self, distance_meters: Option<f64>, is_overlapping: bool) {
        self.nearest_distance_meters = distance_meters;
        self.is_overlapping = distance_meters.is_some() && is_overlapping;
    }

    pub(crate) fn set_sync_failed(&mut self, failed: bool) {
        self.last_sync_failed = failed;
    }

    pub(crate) fn set_foreground(&mut self, is_foreground: bool) {
        self.is_foreground = is_foreground;
    }
}
