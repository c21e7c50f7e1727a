// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Alert Policy
//!
//! Edge-triggered notification decisions, plus the notification sink seam
//! the platform implements.
//!
//! A notification fires only on the rising edge into the overlap radius
//! while the app is in the background. Staying inside the radius across
//! polls never re-fires; leaving and re-entering does.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::proximity::ProximityThresholds;

/// Default notification id. Reusing one id makes the platform replace the
/// previous alert instead of stacking a new one each time.
pub const DEFAULT_NOTIFICATION_ID: &str = "0";

/// Default notification title.
pub const DEFAULT_NOTIFICATION_TITLE: &str = "Too close!";

/// A user-visible local notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Platform notification id.
    pub id: String,
    /// Title line.
    pub title: String,
    /// Body text.
    pub body: String,
}

impl Notification {
    /// Builds the "too close" notification for a distance in meters.
    pub fn too_close(id: &str, title: &str, distance_meters: f64) -> Self {
        Notification {
            id: id.to_string(),
            title: title.to_string(),
            body: format!("{:.0} meters to the nearest user", distance_meters),
        }
    }
}

/// Receives notification side effects from the engine.
///
/// Implemented by the platform (local notifications on mobile, terminal
/// output in the CLI). Calls are one-shot; the sink never mutates engine
/// state.
pub trait NotificationSink: Send + Sync {
    /// Shows a notification.
    fn emit(&self, notification: Notification);

    /// Removes every pending or delivered notification.
    fn clear_all(&self);
}

/// Outcome of one policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertDecision {
    /// Whether a notification must be emitted now.
    pub notify: bool,
    /// The new overlap flag to store.
    pub is_overlapping: bool,
}

/// Rising-edge alert policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertPolicy {
    thresholds: ProximityThresholds,
}

impl AlertPolicy {
    /// Creates a policy using the given thresholds.
    pub fn new(thresholds: ProximityThresholds) -> Self {
        AlertPolicy { thresholds }
    }

    /// Returns the thresholds in use.
    pub fn thresholds(&self) -> &ProximityThresholds {
        &self.thresholds
    }

    /// Evaluates a new distance reading.
    ///
    /// `was_overlapping` is the flag stored after the previous reading.
    /// The overlap flag is tracked in the foreground too, so a later
    /// background reading sees the right edge.
    pub fn evaluate(
        &self,
        was_overlapping: bool,
        distance_meters: Option<f64>,
        is_foreground: bool,
    ) -> AlertDecision {
        let is_overlapping = distance_meters
            .filter(|d| d.is_finite())
            .is_some_and(|d| self.thresholds.is_overlapping(d));

        AlertDecision {
            notify: is_overlapping && !was_overlapping && !is_foreground,
            is_overlapping,
        }
    }
}

/// Notification sink that records calls, for tests.
#[derive(Debug, Default)]
pub struct MockNotificationSink {
    emitted: Mutex<Vec<Notification>>,
    clear_count: Mutex<usize>,
}

impl MockNotificationSink {
    /// Creates an empty mock sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every notification emitted so far.
    pub fn emitted(&self) -> Vec<Notification> {
        self.emitted.lock().map(|v| v.clone()).unwrap_or_default()
    }

    /// Returns how many times `clear_all` was called.
    pub fn clear_count(&self) -> usize {
        self.clear_count.lock().map(|c| *c).unwrap_or_default()
    }
}

impl NotificationSink for MockNotificationSink {
    fn emit(&self, notification: Notification) {
        if let Ok(mut emitted) = self.emitted.lock() {
            emitted.push(notification);
        }
    }

    fn clear_all(&self) {
        if let Ok(mut count) = self.clear_count.lock() {
            *count += 1;
        }
    }
}
