// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Proximity Classifier
//!
//! Maps a nearest-user distance to a discrete risk band.

use serde::{Deserialize, Serialize};

/// Two users at or below this distance overlap.
pub const OVERLAP_THRESHOLD_METERS: f64 = 50.0;

/// Upper bound of the near-miss band.
pub const NEAR_MISS_THRESHOLD_METERS: f64 = 60.0;

/// Beyond this distance the view layer hides the nearest-user readout.
pub const DISPLAY_CUTOFF_METERS: f64 = 500.0;

/// Risk band for a nearest-user distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProximityLevel {
    /// Within the overlap radius.
    Critical,
    /// Just outside the overlap radius.
    Warning,
    /// Comfortably apart.
    Safe,
    /// No distance available (no location yet, or nobody else around).
    Unknown,
}

impl ProximityLevel {
    /// Short lowercase name, used in logs and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProximityLevel::Critical => "critical",
            ProximityLevel::Warning => "warning",
            ProximityLevel::Safe => "safe",
            ProximityLevel::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ProximityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunable distance thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityThresholds {
    /// Inclusive upper bound of `Critical`.
    pub overlap_meters: f64,
    /// Inclusive upper bound of `Warning`.
    pub near_miss_meters: f64,
    /// Readouts above this are not displayed.
    pub display_cutoff_meters: f64,
}

impl Default for ProximityThresholds {
    fn default() -> Self {
        ProximityThresholds {
            overlap_meters: OVERLAP_THRESHOLD_METERS,
            near_miss_meters: NEAR_MISS_THRESHOLD_METERS,
            display_cutoff_meters: DISPLAY_CUTOFF_METERS,
        }
    }
}

impl ProximityThresholds {
    /// Classifies a distance against these thresholds.
    ///
    /// `None`, infinite and NaN distances are `Unknown`.
    pub fn classify(&self, distance_meters: Option<f64>) -> ProximityLevel {
        match distance_meters {
            Some(d) if d.is_finite() => {
                if d <= self.overlap_meters {
                    ProximityLevel::Critical
                } else if d <= self.near_miss_meters {
                    ProximityLevel::Warning
                } else {
                    ProximityLevel::Safe
                }
            }
            _ => ProximityLevel::Unknown,
        }
    }

    /// Returns true if the distance falls inside the overlap radius.
    pub fn is_overlapping(&self, distance_meters: f64) -> bool {
        distance_meters <= self.overlap_meters
    }

    /// Returns true if the view layer should show this distance.
    pub fn is_displayable(&self, distance_meters: f64) -> bool {
        distance_meters.is_finite() && distance_meters <= self.display_cutoff_meters
    }
}

/// Classifies a distance with the default thresholds.
pub fn classify(distance_meters: Option<f64>) -> ProximityLevel {
    ProximityThresholds::default().classify(distance_meters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_thresholds() {
        let thresholds = ProximityThresholds {
            overlap_meters: 10.0,
            near_miss_meters: 20.0,
            display_cutoff_meters: 100.0,
        };
        assert_eq!(thresholds.classify(Some(15.0)), ProximityLevel::Warning);
        assert_eq!(thresholds.classify(Some(50.0)), ProximityLevel::Safe);
        assert!(!thresholds.is_displayable(150.0));
    }

    #[test]
    fn test_nan_is_unknown() {
        assert_eq!(classify(Some(f64::NAN)), ProximityLevel::Unknown);
    }
}
