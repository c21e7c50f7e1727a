// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! App Lifecycle Tracker
//!
//! Tracks whether the hosting app is foregrounded.

use serde::{Deserialize, Serialize};

/// Foreground/background state of the hosting app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AppState {
    /// The app is visible and active.
    #[default]
    Foreground,
    /// The app is running but not visible.
    Background,
}

impl AppState {
    /// Returns true for `Foreground`.
    pub fn is_foreground(&self) -> bool {
        matches!(self, AppState::Foreground)
    }
}

/// Raw lifecycle signal delivered by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleSignal {
    /// The app became active.
    Active,
    /// The app went inactive or to the background.
    Inactive,
}

impl LifecycleSignal {
    /// Parses a platform app-state string.
    ///
    /// `"active"` and `"foreground"` are `Active`; every other value,
    /// including unknown ones, is `Inactive`.
    pub fn from_platform(state: &str) -> Self {
        match state.trim().to_ascii_lowercase().as_str() {
            "active" | "foreground" => LifecycleSignal::Active,
            _ => LifecycleSignal::Inactive,
        }
    }

    /// The app state this signal moves to.
    pub fn target_state(&self) -> AppState {
        match self {
            LifecycleSignal::Active => AppState::Foreground,
            LifecycleSignal::Inactive => AppState::Background,
        }
    }
}

/// A state change produced by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleTransition {
    /// Background -> Foreground. Outstanding notifications must be cleared.
    EnteredForeground,
    /// Foreground -> Background.
    EnteredBackground,
}

/// Two-state lifecycle machine.
#[derive(Debug, Clone, Default)]
pub struct LifecycleTracker {
    state: AppState,
}

impl LifecycleTracker {
    /// Creates a tracker in the given initial state.
    pub fn new(initial: AppState) -> Self {
        LifecycleTracker { state: initial }
    }

    /// Current state.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Returns true while foregrounded.
    pub fn is_foreground(&self) -> bool {
        self.state.is_foreground()
    }

    /// Applies a signal. Returns the transition, or `None` if the signal
    /// repeats the current state.
    pub fn apply(&mut self, signal: LifecycleSignal) -> Option<LifecycleTransition> {
        let target = signal.target_state();
        if target == self.state {
            return None;
        }
        self.state = target;
        Some(match target {
            AppState::Foreground => LifecycleTransition::EnteredForeground,
            AppState::Background => LifecycleTransition::EnteredBackground,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_strings() {
        assert_eq!(LifecycleSignal::from_platform("active"), LifecycleSignal::Active);
        assert_eq!(LifecycleSignal::from_platform(" Foreground\n"), LifecycleSignal::Active);
        assert_eq!(LifecycleSignal::from_platform("inactive"), LifecycleSignal::Inactive);
        assert_eq!(LifecycleSignal::from_platform("background"), LifecycleSignal::Inactive);
        assert_eq!(LifecycleSignal::from_platform("unknown"), LifecycleSignal::Inactive);
    }

    #[test]
    fn test_default_is_foreground() {
        assert!(LifecycleTracker::default().is_foreground());
    }
}
