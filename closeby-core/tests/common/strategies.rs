// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Proptest Strategies
//!
//! Reusable proptest strategies for property-based testing.
//! Import these in property test files to avoid duplication.

use closeby_core::Coordinate;
use proptest::prelude::*;

// ============================================================
// Coordinate Strategies
// ============================================================

/// Strategy for any valid coordinate on the globe.
pub fn coordinate_strategy() -> impl Strategy<Value = Coordinate> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon))
}

/// Strategy for coordinates clustered in a small city-sized area, where
/// users realistically get within tens of meters of each other.
pub fn city_coordinate_strategy() -> impl Strategy<Value = Coordinate> {
    (43.09f64..43.12, 131.89f64..131.93).prop_map(|(lat, lon)| Coordinate::new(lat, lon))
}

/// Strategy for a non-empty crowd of nearby users.
pub fn crowd_strategy() -> impl Strategy<Value = Vec<Coordinate>> {
    prop::collection::vec(city_coordinate_strategy(), 1..20)
}

// ============================================================
// Distance Strategies
// ============================================================

/// Strategy for background distance readings around the alert thresholds.
pub fn distance_reading_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![0.0f64..50.0, 50.0f64..=60.0, 60.0f64..1000.0]
}
