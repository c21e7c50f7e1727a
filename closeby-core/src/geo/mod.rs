// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Geo Math
//!
//! Great-circle distance and nearest-neighbor search over coordinates.
//! Everything here is pure: no I/O, no shared state.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Meters per kilometer; the registry reports kilometers on the wire.
pub const METERS_PER_KM: f64 = 1000.0;

/// A WGS84 position in decimal degrees.
///
/// Equality is exact (bit-for-bit on the float values); the engine relies on
/// it to recognise its own entry in the registry's response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude in degrees.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate {
            latitude,
            longitude,
        }
    }

    /// Returns true if both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Great-circle distance to `other` in meters.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        distance_meters(*self, *other)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Coordinate::new(latitude, longitude)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Coordinate::new(latitude, longitude)
    }
}

/// Great-circle (haversine) distance between two coordinates, in meters.
///
/// Symmetric, non-negative, and exactly zero for identical coordinates.
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c * METERS_PER_KM
}

/// Distance from `origin` to the closest coordinate in `others`.
///
/// Entries equal to `origin` are skipped. Returns `f64::INFINITY` when
/// nothing is left to compare against.
pub fn nearest_distance(origin: Coordinate, others: &[Coordinate]) -> f64 {
    others
        .iter()
        .filter(|other| **other != origin)
        .map(|other| distance_meters(origin, *other))
        .fold(f64::INFINITY, f64::min)
}

/// Distance from `points[index]` to the closest *other entry* of `points`.
///
/// Only the entry at `index` is excluded, so a second user standing on the
/// exact same fix counts as zero meters away. Returns `f64::INFINITY` when
/// `points` has no other entry or `index` is out of range.
pub fn nearest_excluding(points: &[Coordinate], index: usize) -> f64 {
    let Some(origin) = points.get(index) else {
        return f64::INFINITY;
    };

    points
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, other)| distance_meters(*origin, *other))
        .fold(f64::INFINITY, f64::min)
}

/// Rounds a distance to whole meters. Infinite values pass through.
pub fn round_meters(meters: f64) -> f64 {
    if meters.is_finite() {
        meters.round()
    } else {
        meters
    }
}

/// Converts a finite distance to `Some`, infinite or NaN to `None`.
pub fn finite(meters: f64) -> Option<f64> {
    meters.is_finite().then_some(meters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_degree_of_latitude() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 0.0);
        let d = distance_meters(a, b);
        assert!((d - 111_194.9).abs() < 1.0, "got {}", d);
    }

    #[test]
    fn test_antipodal_points_do_not_produce_nan() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 180.0);
        let d = distance_meters(a, b);
        assert!(d.is_finite());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM * METERS_PER_KM).abs() < 1.0);
    }

    #[test]
    fn test_nearest_excluding_out_of_range() {
        let points = [Coordinate::new(1.0, 1.0)];
        assert!(nearest_excluding(&points, 3).is_infinite());
    }

    #[test]
    fn test_round_meters_keeps_infinity() {
        assert_eq!(round_meters(50.0377), 50.0);
        assert!(round_meters(f64::INFINITY).is_infinite());
    }
}
